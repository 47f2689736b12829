use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use entry_codec::FrontMatterCodec;
use entry_diff::{diff_texts, LineDiff};
use entry_preview::{ChangePreviewWorkflow, EntryForm, PreviewMode, PreviewSession};
use entry_store::catalog::sort_by_count;
use entry_store::{DirectoryStore, DocumentStore};
use entry_types::{DocumentMetadata, Entry, Tag};
use serde_json::json;

use crate::cli::*;
use crate::config::ConsoleConfig;
use crate::render::DiffRenderer;

/// Shared state for a single command invocation.
struct Console {
    config: ConsoleConfig,
    renderer: DiffRenderer,
    format: OutputFormat,
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = ConsoleConfig::resolve(cli.config.as_deref())?;
    let console = Console {
        renderer: DiffRenderer::from_config(&config, cli.no_color),
        config,
        format: cli.format,
    };
    let output = match cli.command {
        Command::Diff(args) => cmd_diff(&console, args),
        Command::Encode(args) => cmd_encode(args),
        Command::Decode(args) => cmd_decode(&console, args),
        Command::Show(args) => cmd_show(&console, args),
        Command::Preview(args) => cmd_preview(&console, args),
        Command::List => cmd_list(&console),
        Command::Delete(args) => cmd_delete(&console, args),
        Command::Template => Ok(FrontMatterCodec::template()),
        Command::Tags(args) => cmd_tags(&console, args),
        Command::Categories => cmd_categories(&console),
    }?;
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn open_store(config: &ConsoleConfig) -> anyhow::Result<DirectoryStore> {
    DirectoryStore::open(&config.store_root, &config.tenant)
        .with_context(|| format!("opening store at {}", config.store_root.display()))
}

impl Console {
    fn render_diff(&self, diff: &LineDiff, context: Option<usize>) -> String {
        match context.or(self.config.context_lines) {
            Some(context) => self.renderer.render_hunks(diff, context),
            None => self.renderer.render(diff),
        }
    }
}

fn cmd_diff(console: &Console, args: DiffArgs) -> anyhow::Result<String> {
    let original = read_text(&args.original)?;
    let modified = read_text(&args.modified)?;
    let diff = diff_texts(&original, &modified);
    tracing::debug!(lines = diff.len(), identical = diff.is_identical(), "computed diff");

    match console.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&diff)?),
        OutputFormat::Text => {
            if diff.is_identical() {
                return Ok("No changes.".to_string());
            }
            let mut out = console.render_diff(&diff, args.context);
            out.push_str(&console.renderer.summary(&diff));
            Ok(out)
        }
    }
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<String> {
    let body = match &args.body_file {
        Some(path) => read_text(path)?,
        None => String::new(),
    };
    let mut metadata = DocumentMetadata::new(args.title);
    if let Some(summary) = args.summary {
        metadata = metadata.with_summary(summary);
    }
    for category in args.categories {
        metadata = metadata.with_category(category);
    }
    for tag in args.tags {
        metadata = metadata.with_tag(Tag::new(tag));
    }
    if let Some(date) = args.date {
        metadata = metadata.with_date(date);
    }
    if let Some(updated) = args.updated {
        metadata = metadata.with_updated(updated);
    }
    Ok(FrontMatterCodec::encode(&metadata, &body))
}

fn cmd_decode(console: &Console, args: DecodeArgs) -> anyhow::Result<String> {
    let decoded = FrontMatterCodec::decode(&read_text(&args.file)?);
    match console.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&decoded)?),
        OutputFormat::Text => {
            let meta = &decoded.metadata;
            let mut out = String::new();
            let field = |name: &str, value: Option<String>| match value {
                Some(value) => format!("{:<10}{}\n", format!("{name}:"), value),
                None => String::new(),
            };
            out.push_str(&field("title", meta.title.clone()));
            out.push_str(&field("summary", meta.summary.clone()));
            out.push_str(&field(
                "category",
                meta.categories
                    .as_ref()
                    .map(|cs| cs.iter().map(|c| c.name.as_str()).collect::<Vec<_>>().join(" > ")),
            ));
            out.push_str(&field(
                "tags",
                meta.tags
                    .as_ref()
                    .map(|ts| ts.iter().map(|t| t.name.as_str()).collect::<Vec<_>>().join(", ")),
            ));
            out.push_str(&field("date", meta.date.clone()));
            out.push_str(&field("updated", meta.updated.clone()));
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&decoded.body);
            Ok(out)
        }
    }
}

fn cmd_show(console: &Console, args: ShowArgs) -> anyhow::Result<String> {
    let store = open_store(&console.config)?;
    let Some(entry) = store.fetch(args.id)? else {
        bail!("entry {} not found", args.id);
    };
    match console.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&entry)?),
        OutputFormat::Text => Ok(FrontMatterCodec::encode_document(&entry.document)),
    }
}

fn cmd_list(console: &Console) -> anyhow::Result<String> {
    let entries = open_store(&console.config)?.list()?;
    if let OutputFormat::Json = console.format {
        return Ok(serde_json::to_string_pretty(&entries)?);
    }
    if entries.is_empty() {
        return Ok("No entries found.".to_string());
    }
    let mut out = String::new();
    for entry in &entries {
        let meta = &entry.document.metadata;
        let tags: Vec<_> = meta.tags.iter().map(|t| t.name.as_str()).collect();
        out.push_str(&format!(
            "{:>4}  {}  [{}]  {}\n",
            entry.entry_id,
            meta.title,
            meta.category_path(),
            tags.join(", ")
        ));
    }
    out.push_str(&format!("\n{} entries\n", entries.len()));
    Ok(out)
}

fn cmd_delete(console: &Console, args: DeleteArgs) -> anyhow::Result<String> {
    let store = open_store(&console.config)?;
    if store.fetch(args.id)?.is_none() {
        bail!("entry {} not found", args.id);
    }
    if !args.yes {
        return Ok(format!("Run again with --yes to delete entry {}.", args.id));
    }
    store.delete(args.id)?;
    tracing::info!(id = %args.id, "deleted entry");
    Ok(format!("Deleted entry {}", args.id))
}

fn cmd_tags(console: &Console, args: TagsArgs) -> anyhow::Result<String> {
    let mut tags = open_store(&console.config)?.tag_counts()?;
    if args.sort {
        sort_by_count(&mut tags);
    }
    if let OutputFormat::Json = console.format {
        return Ok(serde_json::to_string_pretty(&tags)?);
    }
    if tags.is_empty() {
        return Ok("No tags found.".to_string());
    }
    let width = tags.iter().map(|t| t.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for tag in &tags {
        out.push_str(&format!("{:<width$}  {}\n", tag.name, tag.count));
    }
    let total: usize = tags.iter().map(|t| t.count).sum();
    out.push_str(&format!("\nTotal: {} unique tags, {} total usage\n", tags.len(), total));
    Ok(out)
}

fn cmd_categories(console: &Console) -> anyhow::Result<String> {
    let paths = open_store(&console.config)?.category_paths()?;
    if let OutputFormat::Json = console.format {
        return Ok(serde_json::to_string_pretty(&paths)?);
    }
    if paths.is_empty() {
        return Ok("No categories found.".to_string());
    }
    let mut out = String::new();
    for path in &paths {
        let names: Vec<_> = path.iter().map(|c| c.name.as_str()).collect();
        out.push_str(&format!("  {}\n", names.join(" > ")));
    }
    out.push_str(&format!("\nTotal: {} category paths\n", paths.len()));
    Ok(out)
}

fn cmd_preview(console: &Console, args: PreviewArgs) -> anyhow::Result<String> {
    let content = match &args.content_file {
        Some(path) => read_text(path)?,
        None => String::new(),
    };
    let mode = match (args.id, args.edit) {
        (Some(entry_id), true) => PreviewMode::Edit {
            entry_id,
            update_timestamp: args.update_timestamp,
        },
        (entry_id, _) => PreviewMode::Create { entry_id },
    };
    let mut form = EntryForm::new(args.title, content).with_summary(args.summary);
    for category in args.categories {
        form = form.with_category(category);
    }
    for tag in args.tags {
        form = form.with_tag(tag);
    }

    let workflow = ChangePreviewWorkflow::new(open_store(&console.config)?);
    let session = workflow.prepare(mode, form)?;
    let saved = if args.yes && session.has_changes() {
        Some(workflow.confirm(&session)?)
    } else {
        None
    };

    match console.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "title": session.title(),
            "mode": session.mode(),
            "hasChanges": session.has_changes(),
            "diff": session.diff(),
            "saved": saved,
        }))?),
        OutputFormat::Text => Ok(render_preview(console, &session, args.context, saved.as_ref())),
    }
}

fn render_preview(
    console: &Console,
    session: &PreviewSession,
    context: Option<usize>,
    saved: Option<&Entry>,
) -> String {
    let mut out = format!("{}\n\n", console.renderer.heading(&session.title()));
    if !session.has_changes() {
        out.push_str("No changes.\n");
        return out;
    }
    out.push_str(&console.render_diff(session.diff(), context));
    out.push_str(&console.renderer.summary(session.diff()));
    out.push('\n');
    match saved {
        Some(entry) => out.push_str(&format!("Saved entry {}\n", entry.entry_id)),
        None => out.push_str("Run again with --yes to save.\n"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use entry_types::EntryId;
    use tempfile::TempDir;

    fn console(root: &Path, format: OutputFormat) -> Console {
        let config = ConsoleConfig {
            store_root: root.to_path_buf(),
            color: false,
            ..ConsoleConfig::default()
        };
        Console {
            renderer: DiffRenderer::from_config(&config, true),
            config,
            format,
        }
    }

    fn parse(args: &[&str]) -> Command {
        let mut argv = vec!["entry"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn diff_files() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.md");
        let b = dir.path().join("b.md");
        fs::write(&a, "a\nb\nc").unwrap();
        fs::write(&b, "a\nx\nc").unwrap();
        let c = console(dir.path(), OutputFormat::Text);
        let Command::Diff(args) = parse(&["diff", a.to_str().unwrap(), b.to_str().unwrap()]) else {
            panic!("wrong command");
        };
        let out = cmd_diff(&c, args).unwrap();
        assert!(out.contains("   2 - b\n"));
        assert!(out.contains("   2 + x\n"));
        assert!(out.ends_with("+1 -1"));
    }

    #[test]
    fn diff_identical_files() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.md");
        fs::write(&a, "same").unwrap();
        let c = console(dir.path(), OutputFormat::Text);
        let Command::Diff(args) = parse(&["diff", a.to_str().unwrap(), a.to_str().unwrap()]) else {
            panic!("wrong command");
        };
        assert_eq!(cmd_diff(&c, args).unwrap(), "No changes.");
    }

    #[test]
    fn diff_json() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.md");
        let b = dir.path().join("b.md");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();
        let c = console(dir.path(), OutputFormat::Json);
        let Command::Diff(args) = parse(&["diff", a.to_str().unwrap(), b.to_str().unwrap()]) else {
            panic!("wrong command");
        };
        let value: serde_json::Value = serde_json::from_str(&cmd_diff(&c, args).unwrap()).unwrap();
        assert_eq!(value[0]["kind"], "deleted");
        assert_eq!(value[1]["kind"], "added");
    }

    #[test]
    fn diff_missing_file() {
        let dir = TempDir::new().unwrap();
        let c = console(dir.path(), OutputFormat::Text);
        let Command::Diff(args) = parse(&["diff", "/nonexistent/a", "/nonexistent/b"]) else {
            panic!("wrong command");
        };
        assert!(cmd_diff(&c, args).is_err());
    }

    #[test]
    fn encode_then_decode() {
        let dir = TempDir::new().unwrap();
        let body = dir.path().join("body.md");
        fs::write(&body, "Hello").unwrap();
        let Command::Encode(args) = parse(&[
            "encode",
            "--title",
            "Hi",
            "--tag",
            "a",
            "--tag",
            "b",
            "--body-file",
            body.to_str().unwrap(),
        ]) else {
            panic!("wrong command");
        };
        let text = cmd_encode(args).unwrap();
        assert_eq!(text, "---\ntitle: \"Hi\"\ntags: [\"a\", \"b\"]\n---\n\nHello");

        let doc = dir.path().join("doc.md");
        fs::write(&doc, &text).unwrap();
        let c = console(dir.path(), OutputFormat::Text);
        let Command::Decode(args) = parse(&["decode", doc.to_str().unwrap()]) else {
            panic!("wrong command");
        };
        let out = cmd_decode(&c, args).unwrap();
        assert_eq!(out, "title:    Hi\ntags:     a, b\n\nHello");
    }

    #[test]
    fn decode_json_without_header() {
        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("doc.md");
        fs::write(&doc, "  plain body  ").unwrap();
        let c = console(dir.path(), OutputFormat::Json);
        let Command::Decode(args) = parse(&["decode", doc.to_str().unwrap()]) else {
            panic!("wrong command");
        };
        let out = cmd_decode(&c, args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["body"], "plain body");
    }

    #[test]
    fn preview_create_then_show() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content.md");
        fs::write(&content, "Body").unwrap();
        let c = console(dir.path(), OutputFormat::Text);

        let Command::Preview(args) = parse(&[
            "preview", "--title", "First", "--content-file", content.to_str().unwrap(),
        ]) else {
            panic!("wrong command");
        };
        let out = cmd_preview(&c, args).unwrap();
        assert!(out.starts_with("Review New Entry"));
        assert!(out.ends_with("Run again with --yes to save.\n"));
        assert!(open_store(&c.config).unwrap().ids().unwrap().is_empty());

        let Command::Preview(args) = parse(&[
            "preview", "--title", "First", "--content-file", content.to_str().unwrap(), "--yes",
        ]) else {
            panic!("wrong command");
        };
        let out = cmd_preview(&c, args).unwrap();
        assert!(out.ends_with("Saved entry 1\n"));

        let Command::Show(args) = parse(&["show", "1"]) else {
            panic!("wrong command");
        };
        let shown = cmd_show(&c, args).unwrap();
        assert_eq!(shown, "---\ntitle: \"First\"\n---\n\nBody");
    }

    #[test]
    fn preview_edit_without_changes() {
        let dir = TempDir::new().unwrap();
        let c = console(dir.path(), OutputFormat::Text);
        let store = open_store(&c.config).unwrap();
        let id = EntryId::new(4).unwrap();
        store
            .save(Some(id), &entry_types::Document::new(DocumentMetadata::new("T"), "Body"))
            .unwrap();

        let content = dir.path().join("content.md");
        fs::write(&content, "Body").unwrap();
        let Command::Preview(args) = parse(&[
            "preview",
            "--id",
            "4",
            "--edit",
            "--title",
            "T",
            "--content-file",
            content.to_str().unwrap(),
            "--yes",
        ]) else {
            panic!("wrong command");
        };
        let out = cmd_preview(&c, args).unwrap();
        assert_eq!(out, "Review Changes\n\nNo changes.\n");
    }

    #[test]
    fn preview_edit_missing_entry() {
        let dir = TempDir::new().unwrap();
        let c = console(dir.path(), OutputFormat::Text);
        let args = parse(&["preview", "--id", "9", "--edit", "--title", "T"]);
        let Command::Preview(args) = args else {
            panic!("wrong command");
        };
        assert!(cmd_preview(&c, args).is_err());
    }

    #[test]
    fn show_missing_entry() {
        let dir = TempDir::new().unwrap();
        let c = console(dir.path(), OutputFormat::Text);
        let Command::Show(args) = parse(&["show", "2"]) else {
            panic!("wrong command");
        };
        let err = cmd_show(&c, args).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    fn seeded(dir: &Path) -> Console {
        let c = console(dir, OutputFormat::Text);
        let store = open_store(&c.config).unwrap();
        let docs = [
            DocumentMetadata::new("One")
                .with_category("Tech")
                .with_category("Rust")
                .with_tag(Tag::new("rust")),
            DocumentMetadata::new("Two")
                .with_category("Life")
                .with_tag(Tag::new("rust"))
                .with_tag(Tag::new("notes")),
        ];
        for meta in docs {
            store.save(None, &entry_types::Document::new(meta, "")).unwrap();
        }
        c
    }

    #[test]
    fn list_shows_each_entry() {
        let dir = TempDir::new().unwrap();
        let c = seeded(dir.path());
        let out = cmd_list(&c).unwrap();
        assert_eq!(
            out,
            "   1  One  [Tech > Rust]  rust\n   2  Two  [Life]  rust, notes\n\n2 entries\n"
        );
    }

    #[test]
    fn list_empty_store() {
        let dir = TempDir::new().unwrap();
        let c = console(dir.path(), OutputFormat::Text);
        assert_eq!(cmd_list(&c).unwrap(), "No entries found.");
    }

    #[test]
    fn delete_requires_confirmation() {
        let dir = TempDir::new().unwrap();
        let c = seeded(dir.path());

        let Command::Delete(args) = parse(&["delete", "1"]) else {
            panic!("wrong command");
        };
        assert_eq!(cmd_delete(&c, args).unwrap(), "Run again with --yes to delete entry 1.");
        assert_eq!(open_store(&c.config).unwrap().ids().unwrap().len(), 2);

        let Command::Delete(args) = parse(&["delete", "1", "--yes"]) else {
            panic!("wrong command");
        };
        assert_eq!(cmd_delete(&c, args).unwrap(), "Deleted entry 1");
        let ids = open_store(&c.config).unwrap().ids().unwrap();
        assert_eq!(ids, vec![EntryId::new(2).unwrap()]);
    }

    #[test]
    fn delete_missing_entry_fails() {
        let dir = TempDir::new().unwrap();
        let c = console(dir.path(), OutputFormat::Text);
        let Command::Delete(args) = parse(&["delete", "7", "--yes"]) else {
            panic!("wrong command");
        };
        assert!(cmd_delete(&c, args).unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn tags_by_name_and_by_count() {
        let dir = TempDir::new().unwrap();
        let c = seeded(dir.path());

        let Command::Tags(args) = parse(&["tags"]) else {
            panic!("wrong command");
        };
        assert_eq!(
            cmd_tags(&c, args).unwrap(),
            "notes  1\nrust   2\n\nTotal: 2 unique tags, 3 total usage\n"
        );

        let Command::Tags(args) = parse(&["tags", "--sort"]) else {
            panic!("wrong command");
        };
        assert!(cmd_tags(&c, args).unwrap().starts_with("rust   2\nnotes  1\n"));
    }

    #[test]
    fn categories_json() {
        let dir = TempDir::new().unwrap();
        let mut c = seeded(dir.path());
        c.format = OutputFormat::Json;
        let value: serde_json::Value = serde_json::from_str(&cmd_categories(&c).unwrap()).unwrap();
        assert_eq!(value[0][0]["name"], "Life");
        assert_eq!(value[1][1]["name"], "Rust");
    }

    #[test]
    fn categories_text() {
        let dir = TempDir::new().unwrap();
        let c = seeded(dir.path());
        assert_eq!(
            cmd_categories(&c).unwrap(),
            "  Life\n  Tech > Rust\n\nTotal: 2 category paths\n"
        );
    }

    #[test]
    fn saved_content_file_with_trailing_newline_previews_clean() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content.md");
        fs::write(&content, "Body\n").unwrap();
        let c = console(dir.path(), OutputFormat::Text);
        let path = content.to_str().unwrap();

        let args = parse(&["preview", "--title", "T", "--content-file", path, "--yes"]);
        let Command::Preview(args) = args else {
            panic!("wrong command");
        };
        assert!(cmd_preview(&c, args).unwrap().ends_with("Saved entry 1\n"));

        let Command::Preview(args) = parse(&[
            "preview",
            "--id",
            "1",
            "--edit",
            "--title",
            "T",
            "--content-file",
            path,
            "--yes",
        ]) else {
            panic!("wrong command");
        };
        assert_eq!(cmd_preview(&c, args).unwrap(), "Review Changes\n\nNo changes.\n");
    }
}
