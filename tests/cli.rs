use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn bin() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pwcrypt"));
    cmd.env_remove("RUST_LOG").env_remove("PWCRYPT_QUIET");
    cmd
}

#[test]
fn crypt_is_default() {
    bin()
	.args(["--salt", "xO", "password"])
	.assert()
	.success()
	.stdout("xOAFZqRz5RduI\n");
}

#[test]
fn md5_with_salt() {
    bin()
	.args(["--md5", "--salt", "xxxxxxxx", "password"])
	.assert()
	.success()
	.stdout("$1$xxxxxxxx$UYCIxa628.9qXjpQCjM4a.\n");
}

#[test]
fn apr1_with_salt() {
    bin()
	.args(["--apr1", "--salt", "xxxxxxxx", "password"])
	.assert()
	.success()
	.stdout("$apr1$xxxxxxxx$dxHfLAsjHkDRmG83UXe8K0\n");
}

#[test]
fn md5_generated_salt() {
    bin()
	.args(["--md5", "password"])
	.assert()
	.success()
	.stdout(predicate::str::is_match(r"^\$1\$[./0-9A-Za-z]{8}\$[./0-9A-Za-z]{22}\n$").unwrap());
}

#[test]
fn several_passwords_one_line_each() {
    let out = bin().args(["--crypt", "--salt", "aZ", "test", "password"]).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "aZGJuE6EXrjEE");
    assert!(lines[1].starts_with("aZ"));
    assert_eq!(lines[1].len(), 13);
}

#[test]
fn table_layouts() {
    bin()
	.args(["--md5", "--salt", "xxxxxxxx", "--table", "password"])
	.assert()
	.success()
	.stdout("password\t$1$xxxxxxxx$UYCIxa628.9qXjpQCjM4a.\n");

    bin()
	.args(["--md5", "--salt", "xxxxxxxx", "--table", "--reverse", "password"])
	.assert()
	.success()
	.stdout("$1$xxxxxxxx$UYCIxa628.9qXjpQCjM4a.\tpassword\n");

    // reverse alone has no effect
    bin()
	.args(["--md5", "--salt", "xxxxxxxx", "--reverse", "password"])
	.assert()
	.success()
	.stdout("$1$xxxxxxxx$UYCIxa628.9qXjpQCjM4a.\n");
}

#[test]
fn table_keeps_raw_bytes() {
    bin()
	.args(["--md5", "--salt", "xxxxxxxx", "--table", "--stdin"])
	.write_stdin(vec![0xff, b'a', b'\n'])
	.assert()
	.success()
	.stdout(predicate::function(|out: &[u8]| out.starts_with(b"\xffa\t$1$xxxxxxxx$") && out.ends_with(b"\n")));

    bin()
	.args(["--md5", "--salt", "xxxxxxxx", "--table", "--reverse", "--stdin"])
	.write_stdin(vec![0xff, b'a', b'\n'])
	.assert()
	.success()
	.stdout(predicate::function(|out: &[u8]| out.starts_with(b"$1$xxxxxxxx$") && out.ends_with(b"\t\xffa\n")));
}

#[test]
fn crypt_salt_outside_alphabet() {
    bin()
	.args(["--crypt", "--salt", "!!", "test"])
	.assert()
	.success()
	.stdout("!!5bgZuCO.hxM\n");
}

#[test]
fn conflicting_schemes_fail() {
    bin()
	.args(["--md5", "--apr1", "password"])
	.assert()
	.failure()
	.stderr(predicate::str::contains("mutually exclusive"));
}

#[test]
fn truncation_warning() {
    bin()
	.args(["--salt", "xO", "--table", "0123456789"])
	.assert()
	.success()
	.stdout(predicate::str::starts_with("01234567\txO"))
	.stderr(predicate::str::contains("truncating password to 8 characters"));
}

#[test]
fn quiet_suppresses_warning() {
    let loud = bin().args(["--salt", "xO", "0123456789"]).output().unwrap();
    bin()
	.args(["--quiet", "--salt", "xO", "0123456789"])
	.assert()
	.success()
	.stdout(String::from_utf8(loud.stdout).unwrap())
	.stderr(predicate::str::contains("truncating").not());
}

#[test]
fn passwords_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("passwords.txt");
    fs::write(&path, "password\r\nmyPassword\n").unwrap();

    bin()
	.args(["--apr1", "--salt", "r31.....", "--table", "--in"])
	.arg(&path)
	.assert()
	.success()
	.stdout(predicate::str::contains("myPassword\t$apr1$r31.....$HqJZimcKQFAMYayBlzkrA/\n"))
	.stdout(predicate::str::starts_with("password\t$apr1$r31.....$"));
}

#[test]
fn passwords_from_stdin() {
    bin()
	.args(["--md5", "--salt", "xxxxxxxx", "--stdin"])
	.write_stdin("password")
	.assert()
	.success()
	.stdout("$1$xxxxxxxx$UYCIxa628.9qXjpQCjM4a.\n");
}

#[test]
fn missing_file_fails() {
    let dir = tempdir().unwrap();
    bin()
	.arg("--in")
	.arg(dir.path().join("absent.txt"))
	.assert()
	.failure()
	.stderr(predicate::str::contains("cannot open"));
}

#[test]
fn one_password_source_only() {
    bin()
	.args(["--stdin", "password"])
	.assert()
	.failure();
}
