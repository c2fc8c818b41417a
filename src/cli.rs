//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

/// A terminal-based editor for product variant image tables.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory to scan for picker images (overrides the configured one).
    #[arg(long, value_name = "DIR")]
    pub images: Option<PathBuf>,

    /// Start with empty rows instead of the sample table.
    #[arg(long)]
    pub empty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["varitable"]);
        assert!(cli.images.is_none());
        assert!(!cli.empty);
    }

    #[test]
    fn test_images_flag() {
        let cli = Cli::parse_from(["varitable", "--images", "/tmp/pics"]);
        assert_eq!(cli.images, Some(PathBuf::from("/tmp/pics")));
    }

    #[test]
    fn test_empty_flag() {
        let cli = Cli::parse_from(["varitable", "--empty"]);
        assert!(cli.empty);
    }
}
