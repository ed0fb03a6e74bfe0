use crate::constants::{APP_DESCRIPTION, APP_NAME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A personal plant journal with AI species identification
#[derive(Parser, Debug)]
#[clap(name = APP_NAME, about = APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Command,

    /// Print verbose output
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[clap(
        long,
        global = true,
        default_value = LOG_FORMAT_TEXT,
        value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON]
    )]
    pub log_format: String,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List journal entries, newest first
    List {
        /// Only show favorites
        #[clap(short = 'f', long)]
        favorites: bool,
    },

    /// Show one entry with its notes
    Show {
        /// Entry id
        id: String,
    },

    /// Identify the plant in a photo
    Identify {
        /// Path to a png, jpg, webp, gif, or heic image
        image: PathBuf,

        /// Save the photo and analysis as a journal entry
        #[clap(short = 's', long)]
        save: bool,
    },

    /// Generate a photorealistic plant image from a description
    Generate {
        /// What the plant should look like
        description: String,

        /// Write the image to this file
        #[clap(short = 'o', long)]
        out: Option<PathBuf>,

        /// Identify the generated plant
        #[clap(short = 'i', long)]
        identify: bool,

        /// Identify the generated plant and save it as a journal entry
        #[clap(short = 's', long)]
        save: bool,
    },

    /// Toggle the favorite flag on an entry
    Favorite {
        /// Entry id
        id: String,
    },

    /// Add a note to an entry
    Note {
        /// Entry id
        id: String,

        /// Note text
        text: String,
    },

    /// Delete an entry
    Delete {
        /// Entry id
        id: String,
    },
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        CliArgs::parse_from(std::env::args())
    }

    /// Whether structured JSON logs were requested.
    pub fn json_logs(&self) -> bool {
        self.log_format == LOG_FORMAT_JSON
    }
}
