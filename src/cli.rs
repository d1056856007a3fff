use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "telegraph-uploader")]
#[command(author, version, about = "Telegram bot that uploads photos and publishes Telegraph pages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (long polling)
    Run,

    /// Upload a local image through the configured hosts and print the URL
    Upload {
        /// Path to the image
        file: PathBuf,
    },

    /// Publish a text file as a Telegraph page and print the URL
    Publish {
        /// Path to the text file; a leading `Title: ...` line sets the title
        file: PathBuf,

        /// Author name, also the title when the file has no title line
        #[arg(short, long, default_value = "Anonymous")]
        author: String,

        /// Telegram handle used for the author link
        #[arg(short, long)]
        username: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["telegraph-uploader"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_publish_args() {
        let cli = Cli::try_parse_from(["telegraph-uploader", "publish", "post.txt", "-a", "Ann", "-u", "ann"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Publish {
                file: PathBuf::from("post.txt"),
                author: "Ann".to_string(),
                username: Some("ann".to_string()),
            })
        );
    }

    #[test]
    fn test_upload_requires_file() {
        assert!(Cli::try_parse_from(["telegraph-uploader", "upload"]).is_err());
    }
}
