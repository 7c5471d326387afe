use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{ensure, Context, Result};
use log::debug;

/// Longest token accepted from a word list, in bytes.
pub const MAX_TOKEN_LEN: usize = 39;

/// parse reads whitespace-delimited tokens in order. Tokens longer than [`MAX_TOKEN_LEN`]
/// are rejected instead of being truncated.
pub fn parse<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut words = Vec::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", n + 1))?;
        for token in line.split_whitespace() {
            ensure!(
                token.len() <= MAX_TOKEN_LEN,
                "token on line {} is {} bytes long, at most {} are allowed",
                n + 1,
                token.len(),
                MAX_TOKEN_LEN
            );
            words.push(token.to_owned());
        }
    }
    Ok(words)
}

/// load opens a word list file and parses it.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("could not open word list {}", path.display()))?;
    let words = parse(BufReader::new(file))
        .with_context(|| format!("could not parse word list {}", path.display()))?;
    debug!("loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

#[cfg(test)]
pub mod test {
    use std::io::{Cursor, Write};

    use super::*;

    #[test]
    fn tokens_in_order() -> Result<()> {
        let input = "hunter2\npassword  letmein\n\n\t qwerty \n";
        let words = parse(Cursor::new(input))?;
        assert_eq!(words, ["hunter2", "password", "letmein", "qwerty"]);
        Ok(())
    }

    #[test]
    fn empty_list() -> Result<()> {
        assert!(parse(Cursor::new(""))?.is_empty());
        Ok(())
    }

    #[test]
    fn token_length_is_bounded() {
        let ok = "x".repeat(MAX_TOKEN_LEN);
        assert_eq!(parse(Cursor::new(ok.as_str())).unwrap(), [ok.clone()]);

        let too_long = format!("short\n{}", "x".repeat(MAX_TOKEN_LEN + 1));
        let err = parse(Cursor::new(too_long)).unwrap_err();
        assert!(err.to_string().contains("line 2"), "unexpected error {}", err);
    }

    #[test]
    fn load_from_file() -> Result<()> {
        let path = std::env::temp_dir()
            .join(format!("sha1crack-wordlist-{}.txt", std::process::id()));
        let mut f = File::create(&path)?;
        writeln!(f, "alpha beta")?;
        writeln!(f, "gamma")?;
        drop(f);

        let words = load(&path);
        std::fs::remove_file(&path)?;
        assert_eq!(words?, ["alpha", "beta", "gamma"]);
        Ok(())
    }

    #[test]
    fn missing_file() {
        let err = load("/nonexistent/sha1crack/words.txt").unwrap_err();
        assert!(err.to_string().contains("could not open word list"));
    }
}
