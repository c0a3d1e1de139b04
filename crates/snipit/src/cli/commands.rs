//! # CLI Dispatch
//!
//! Resolves the application context, picks the target collection and routes each
//! parsed command to its handler. Handlers call the API and hand the returned data
//! to `render`; errors bubble up to `main`, which prints them and exits with 1.

use super::render::{
    print_collections, print_full_snippet, print_info, print_lines, print_snippets, print_success,
};
use super::setup::{AddArgs, Cli, CollectionCommands, Commands, EditArgs, ListArgs};
use snipitapp::api::SnipitApi;
use snipitapp::commands::SnippetDraft;
use snipitapp::error::{Result, SnipitError};
use snipitapp::init::initialize;
use snipitapp::model::{Collection, Snippet};
use snipitapp::settings::SettingsPort;
use snipitapp::store::DataStore;
use snipitapp::view::ViewOptions;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

pub fn run(cli: Cli) -> Result<()> {
    let mut ctx = initialize(cli.home.clone())?;

    let dir: Option<PathBuf> = match &cli.collection {
        Some(key) => Some(ctx.api.find_collection(key)?.path),
        None => None,
    };
    if let Some(dir) = &dir {
        tracing::debug!("Targeting collection directory {}", dir.display());
    }
    let dir = dir.as_deref();
    let api = &mut ctx.api;

    match cli.command {
        None => handle_list(api, ListArgs::default(), dir),
        Some(Commands::List(args)) => handle_list(api, args, dir),
        Some(Commands::Show { id }) => handle_show(api, &id, dir),
        Some(Commands::Add(args)) => handle_add(api, args, dir),
        Some(Commands::Edit(args)) => handle_edit(api, args, dir),
        Some(Commands::Delete { id }) => handle_delete(api, &id, dir),
        Some(Commands::Star { id }) => handle_star(api, &id, dir),
        Some(Commands::Path { id }) => handle_path(api, &id, dir),
        Some(Commands::Languages) => {
            print_lines(&api.languages(dir), "No languages found.");
            Ok(())
        }
        Some(Commands::Collections { action }) => {
            handle_collections(api, action.unwrap_or(CollectionCommands::List))
        }
    }
}

fn handle_list<P: SettingsPort, S: DataStore>(
    api: &SnipitApi<P, S>,
    args: ListArgs,
    dir: Option<&Path>,
) -> Result<()> {
    let options = ViewOptions {
        filters: args.filters,
        query: args.query.unwrap_or_default(),
        sort: args.sort,
        starred_first: args.starred_first,
    };
    print_snippets(&api.view(&options, dir));
    Ok(())
}

fn handle_show<P: SettingsPort, S: DataStore>(
    api: &SnipitApi<P, S>,
    id: &str,
    dir: Option<&Path>,
) -> Result<()> {
    print_full_snippet(&existing(api, id, dir)?);
    Ok(())
}

fn handle_add<P: SettingsPort, S: DataStore>(
    api: &mut SnipitApi<P, S>,
    args: AddArgs,
    dir: Option<&Path>,
) -> Result<()> {
    let code = match read_code(args.code, args.file.as_deref())? {
        Some(code) => code,
        None => read_piped_stdin()?.unwrap_or_default(),
    };

    let mut draft = SnippetDraft::new(args.title, code).tags(args.tags);
    if let Some(language) = args.language {
        draft = draft.language(language);
    }
    if let Some(description) = args.description {
        draft = draft.description(description);
    }

    let created = api.create_snippet(draft, dir)?;
    print_success(&format!("Created snippet {}: {}", created.id, created.title));
    Ok(())
}

fn handle_edit<P: SettingsPort, S: DataStore>(
    api: &mut SnipitApi<P, S>,
    args: EditArgs,
    dir: Option<&Path>,
) -> Result<()> {
    let current = existing(api, &args.id, dir)?;
    let mut draft = SnippetDraft::from_snippet(&current);

    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(code) = read_code(args.code, args.file.as_deref())? {
        draft.code = code;
    }
    if let Some(language) = args.language {
        draft.language = language;
    }
    if !args.tags.is_empty() {
        draft.tags = args.tags;
    }
    if let Some(description) = args.description {
        draft.description = Some(description);
    }

    let updated = api.update_snippet(&args.id, draft, dir)?;
    print_success(&format!("Updated snippet {}: {}", updated.id, updated.title));
    Ok(())
}

fn handle_delete<P: SettingsPort, S: DataStore>(
    api: &mut SnipitApi<P, S>,
    id: &str,
    dir: Option<&Path>,
) -> Result<()> {
    let snippet = existing(api, id, dir)?;
    if !api.delete_snippet(id, dir) {
        return Err(SnipitError::Store(format!("Failed to delete snippet {}", id)));
    }
    print_success(&format!("Deleted snippet {}: {}", id, snippet.title));
    Ok(())
}

fn handle_star<P: SettingsPort, S: DataStore>(
    api: &mut SnipitApi<P, S>,
    id: &str,
    dir: Option<&Path>,
) -> Result<()> {
    let snippet = existing(api, id, dir)?;
    if !api.toggle_star(id, dir) {
        return Err(SnipitError::Store(format!("Failed to update snippet {}", id)));
    }
    let verb = if snippet.starred { "Unstarred" } else { "Starred" };
    print_success(&format!("{} snippet {}: {}", verb, id, snippet.title));
    Ok(())
}

fn handle_path<P: SettingsPort, S: DataStore>(
    api: &SnipitApi<P, S>,
    id: &str,
    dir: Option<&Path>,
) -> Result<()> {
    existing(api, id, dir)?;
    let path = api.snippet_path(id, dir).ok_or(SnipitError::NoCollection)?;
    println!("{}", path.display());
    Ok(())
}

fn handle_collections<P: SettingsPort, S: DataStore>(
    api: &SnipitApi<P, S>,
    action: CollectionCommands,
) -> Result<()> {
    match action {
        CollectionCommands::List => {
            let selected = api.selected_collection().map(|c| c.id);
            print_collections(&api.list_collections(), selected.as_deref());
        }
        CollectionCommands::Add { name, path } => {
            std::fs::create_dir_all(&path)?;
            let path = std::fs::canonicalize(&path)?;
            let collection = Collection::new(name, &path);
            let id = collection.id.clone();
            if !api.add_collection(collection) {
                return Err(SnipitError::Api(format!(
                    "A collection is already registered at {}",
                    path.display()
                )));
            }
            print_success(&format!("Added collection {} at {}", id, path.display()));
        }
        CollectionCommands::Remove { collection } => {
            let found = api.find_collection(&collection)?;
            if !api.remove_collection(&found.id) {
                return Err(SnipitError::Store(format!(
                    "Failed to remove collection {}",
                    found.name
                )));
            }
            print_success(&format!("Removed collection {}", found.name));
            print_info(&format!("Snippet files in {} were kept", found.path.display()));
        }
        CollectionCommands::Select { collection } => {
            let found = api.find_collection(&collection)?;
            if !api.select_collection(&found.id) {
                return Err(SnipitError::Store(format!(
                    "Failed to select collection {}",
                    found.name
                )));
            }
            print_success(&format!("Selected collection {}", found.name));
        }
        CollectionCommands::Rename { collection, name } => {
            let found = api.find_collection(&collection)?;
            if !api.rename_collection(&found.id, &name) {
                return Err(SnipitError::Store(format!(
                    "Failed to rename collection {}",
                    found.name
                )));
            }
            print_success(&format!("Renamed collection {} to {}", found.name, name));
        }
    }
    Ok(())
}

fn existing<P: SettingsPort, S: DataStore>(
    api: &SnipitApi<P, S>,
    id: &str,
    dir: Option<&Path>,
) -> Result<Snippet> {
    if api.resolve_dir(dir).is_none() {
        return Err(SnipitError::NoCollection);
    }
    api.get_snippet(id, dir)
        .ok_or_else(|| SnipitError::SnippetNotFound(id.to_string()))
}

/// `--code` wins over `--file`; `None` when neither was given.
fn read_code(code: Option<String>, file: Option<&Path>) -> Result<Option<String>> {
    if let Some(code) = code {
        return Ok(Some(code));
    }
    match file {
        Some(path) => Ok(Some(std::fs::read_to_string(path)?)),
        None => Ok(None),
    }
}

fn read_piped_stdin() -> Result<Option<String>> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer)?;
    Ok(Some(buffer))
}
