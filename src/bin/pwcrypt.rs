use pwcrypt::{HashSetup, Scheme, truncate_password};

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

/// Compute traditional and MD5-based Unix password hashes.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Standard Unix password algorithm (default)
    #[arg(long)]
    crypt: bool,

    /// MD5-based password algorithm
    #[arg(short = '1', long = "md5")]
    md5: bool,

    /// MD5-based password algorithm, Apache variant
    #[arg(long)]
    apr1: bool,

    /// Use provided salt
    #[arg(long, value_name = "SALT")]
    salt: Option<String>,

    /// Read passwords from file
    #[arg(long = "in", value_name = "FILE", conflicts_with = "stdin")]
    infile: Option<PathBuf>,

    /// Read passwords from stdin
    #[arg(long)]
    stdin: bool,

    /// Never verify when reading password from terminal
    #[arg(long)]
    noverify: bool,

    /// No warnings
    #[arg(long, env = "PWCRYPT_QUIET")]
    quiet: bool,

    /// Format output as table
    #[arg(long)]
    table: bool,

    /// Switch table columns
    #[arg(long)]
    reverse: bool,

    /// Passwords to hash
    #[arg(value_name = "PASSWORD", conflicts_with_all = ["infile", "stdin"])]
    passwords: Vec<String>,
}

impl Cli {
    fn scheme(&self) -> pwcrypt::Result<Scheme> {
	let crypt = self.crypt || !(self.md5 || self.apr1);
	Scheme::from_flags(crypt, self.md5, self.apr1)
    }
}

#[derive(Clone, Copy, Debug)]
enum Layout {
    Hash,
    PasswordHash,
    HashPassword,
}

impl Layout {
    fn new(table: bool, reverse: bool) -> Layout {
	match (table, reverse) {
	    (true, false) => Layout::PasswordHash,
	    (true, true) => Layout::HashPassword,
	    (false, _) => Layout::Hash,
	}
    }
}

struct Emitter<'a, W: Write> {
    out: W,
    setup: HashSetup<'a>,
    layout: Layout,
}

impl<W: Write> Emitter<'_, W> {
    fn emit(&mut self, pass: &[u8]) -> Result<()> {
	let pass = truncate_password(pass, self.setup.max_pass_len(), self.setup.quiet);
	let hash = pwcrypt::hash_with(&self.setup, pass)?;
	// passwords are echoed byte for byte, valid UTF-8 or not
	match self.layout {
	    Layout::Hash => writeln!(self.out, "{}", hash)?,
	    Layout::PasswordHash => {
		self.out.write_all(pass)?;
		writeln!(self.out, "\t{}", hash)?;
	    }
	    Layout::HashPassword => {
		write!(self.out, "{}\t", hash)?;
		self.out.write_all(pass)?;
		self.out.write_all(b"\n")?;
	    }
	}
	Ok(())
    }

    fn emit_lines<R: BufRead>(&mut self, mut input: R) -> Result<()> {
	let mut line = Zeroizing::new(Vec::new());
	loop {
	    line.clear();
	    if input.read_until(b'\n', &mut line).context("cannot read password")? == 0 {
		return Ok(());
	    }
	    if line.last() == Some(&b'\n') {
		line.pop();
		if line.last() == Some(&b'\r') {
		    line.pop();
		}
	    }
	    self.emit(&line)?;
	}
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
	.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
	.with_writer(io::stderr)
	.with_ansi(io::stderr().is_terminal())
	.with_target(false)
	.without_time()
	.init();
    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let scheme = cli.scheme()?;
    let setup = HashSetup {
	scheme,
	salt: cli.salt.as_deref(),
	quiet: cli.quiet,
	max_pass_len: None,
    };
    let stdout = io::stdout();
    let mut emitter = Emitter {
	out: stdout.lock(),
	setup,
	layout: Layout::new(cli.table, cli.reverse),
    };

    if !cli.passwords.is_empty() {
	for pw in &cli.passwords {
	    emitter.emit(pw.as_bytes())?;
	}
    } else if let Some(path) = &cli.infile {
	let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
	emitter.emit_lines(BufReader::new(file))?;
    } else if cli.stdin {
	emitter.emit_lines(io::stdin().lock())?;
    } else {
	let verify = cli.salt.is_none() && !cli.noverify;
	let pw = prompt_password(verify)?;
	emitter.emit(pw.as_bytes())?;
    }
    emitter.out.flush()?;
    Ok(())
}

fn prompt_password(verify: bool) -> io::Result<Zeroizing<String>> {
    loop {
	let pw = Zeroizing::new(rpassword::prompt_password("Password: ")?);
	if !verify {
	    return Ok(pw);
	}
	let confirmed = Zeroizing::new(rpassword::prompt_password("Verifying - Password: ")?);
	if *pw == *confirmed {
	    return Ok(pw);
	}
	eprintln!("Error: Passwords don't match!");
    }
}
