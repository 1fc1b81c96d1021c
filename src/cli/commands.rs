use clap::Parser;
use std::path::PathBuf;

/// Assemble a block from the pending transactions in a mempool directory
#[derive(Debug, Parser)]
#[command(name = "block-assembler")]
pub struct Opt {
    #[arg(long = "config", help = "TOML file with limits and paths")]
    pub config: Option<PathBuf>,
    #[arg(long = "mempool", help = "Directory of JSON transaction records")]
    pub mempool: Option<PathBuf>,
    #[arg(long = "output", help = "Report file to (over)write")]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags() {
        let opt = Opt::try_parse_from(["block-assembler"]).unwrap();
        assert!(opt.config.is_none());
        assert!(opt.mempool.is_none());
        assert!(opt.output.is_none());
    }

    #[test]
    fn test_overrides() {
        let opt = Opt::try_parse_from([
            "block-assembler",
            "--mempool",
            "/tmp/pool",
            "--output",
            "block.txt",
        ])
        .unwrap();
        assert_eq!(opt.mempool, Some(PathBuf::from("/tmp/pool")));
        assert_eq!(opt.output, Some(PathBuf::from("block.txt")));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Opt::try_parse_from(["block-assembler", "--nonce", "5"]).is_err());
    }
}
