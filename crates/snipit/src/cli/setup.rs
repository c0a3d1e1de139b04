use clap::{Args, Parser, Subcommand};
use snipitapp::sort::SortOption;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "snipit",
    bin_name = "snipit",
    version,
    disable_help_subcommand = true,
    about = "Personal code snippet manager",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Application directory (default: $SNIPIT_HOME or the OS data directory)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub home: Option<PathBuf>,

    /// Collection to act on, by id or name (default: the selected collection)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub collection: Option<String>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose", help_heading = "Options")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List snippets
    #[command(alias = "ls", display_order = 1)]
    List(ListArgs),

    /// Show a snippet with its code
    #[command(alias = "v", display_order = 2)]
    Show { id: String },

    /// Add a snippet
    #[command(alias = "n", display_order = 3)]
    Add(AddArgs),

    /// Change fields of a snippet
    #[command(alias = "e", display_order = 4)]
    Edit(EditArgs),

    /// Delete a snippet
    #[command(alias = "rm", display_order = 5)]
    Delete { id: String },

    /// Star or unstar a snippet
    #[command(display_order = 6)]
    Star { id: String },

    /// Print the file path of a snippet
    #[command(display_order = 7)]
    Path { id: String },

    /// List languages used in the collection
    #[command(display_order = 8)]
    Languages,

    /// Manage collections
    #[command(alias = "col", display_order = 9)]
    Collections {
        #[command(subcommand)]
        action: Option<CollectionCommands>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Search query, e.g. 'title:react content:"useState(" hooks'
    #[arg(long)]
    pub query: Option<String>,

    /// Side filter: starred, unlabeled or a language name (repeatable)
    #[arg(short, long = "filter", value_name = "FILTER")]
    pub filters: Vec<String>,

    /// Sort order: date-desc, date-asc, title-asc, title-desc
    #[arg(short, long, default_value_t = SortOption::DateDesc)]
    pub sort: SortOption,

    /// List starred snippets first
    #[arg(long)]
    pub starred_first: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(short, long)]
    pub title: String,

    /// Code text (otherwise --file or stdin)
    #[arg(long, conflicts_with = "file")]
    pub code: Option<String>,

    /// Read the code from a file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[arg(short, long)]
    pub language: Option<String>,

    /// Tag (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    #[arg(short, long)]
    pub description: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: String,

    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(long, conflicts_with = "file")]
    pub code: Option<String>,

    /// Read the new code from a file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[arg(short, long)]
    pub language: Option<String>,

    /// Replace the tags (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    #[arg(short, long)]
    pub description: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CollectionCommands {
    /// List registered collections
    List,

    /// Register a directory as a collection
    Add { name: String, path: PathBuf },

    /// Forget a collection (its files stay on disk)
    Remove { collection: String },

    /// Make a collection the default target
    Select { collection: String },

    /// Rename a collection
    Rename { collection: String, name: String },
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_list_options() {
        let cli = Cli::try_parse_from([
            "snipit", "list", "--query", "tag:web", "-f", "starred", "-f", "rust", "--sort", "title-asc",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.query.as_deref(), Some("tag:web"));
                assert_eq!(args.filters, vec!["starred", "rust"]);
                assert_eq!(args.sort, SortOption::TitleAsc);
                assert!(!args.starred_first);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_sort() {
        assert!(Cli::try_parse_from(["snipit", "list", "--sort", "newest"]).is_err());
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["snipit", "languages", "-c", "work", "-vv"]).unwrap();
        assert_eq!(cli.collection.as_deref(), Some("work"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn code_and_file_conflict() {
        let result = Cli::try_parse_from([
            "snipit", "add", "--title", "t", "--code", "x", "--file", "f.rs",
        ]);
        assert!(result.is_err());
    }
}
