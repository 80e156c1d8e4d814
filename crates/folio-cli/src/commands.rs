use anyhow::{bail, Context};
use colored::Colorize;
use folio_blocks::decode;
use folio_client::{ClientConfig, ClientError, ContentApi, HttpContentApi, PendingChanges};
use folio_protocol::{CreatePostRequest, ErrorKind};
use folio_server::{FolioServer, ServerConfig};
use folio_types::{BlockId, ContentBlock, Post, PostId};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let format = cli.format;
    let api = || HttpContentApi::new(ClientConfig::new(cli.url.clone()));
    match cli.command {
        Command::Serve(args) => runtime.block_on(cmd_serve(args)),
        Command::List => runtime.block_on(cmd_list(&api(), &format)),
        Command::Show(args) => runtime.block_on(cmd_show(&api(), args, &format)),
        Command::Create(args) => runtime.block_on(cmd_create(&api(), args, &format)),
        Command::Commit(args) => runtime.block_on(cmd_commit(&api(), args, &format)),
        Command::Pragma(args) => cmd_pragma(args, &format),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

fn print_block(index: usize, block: &ContentBlock) {
    let tag = match block.language() {
        Some(language) => format!("{}:{}", block.tag(), language),
        None => block.tag().to_string(),
    };
    println!(
        "  {:>3}  {:<14} {}  {}",
        index,
        tag.cyan(),
        block.id.short_id().yellow(),
        first_line(&block.content).dimmed()
    );
}

fn print_post(post: &Post) {
    println!("{}", post.title.bold());
    println!("  id:   {}", post.id.as_str().yellow());
    println!("  slug: {}", post.slug);
    println!("  date: {}", post.date.dimmed());
    if !post.tags.is_empty() {
        println!("  tags: {}", post.tags.join(", ").green());
    }
    if !post.lead.is_empty() {
        println!("\n  {}", post.lead);
    }
    println!();
    for (i, block) in post.content.iter().enumerate() {
        print_block(i, block);
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(data) = args.data {
        config.data_path = data;
    }
    println!(
        "{} Folio server on {} (data: {})",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        config.data_path.display()
    );
    FolioServer::new(config).serve().await?;
    Ok(())
}

async fn cmd_list(api: &dyn ContentApi, format: &OutputFormat) -> anyhow::Result<()> {
    let posts = api.list_posts().await?;
    if let OutputFormat::Json = format {
        return print_json(&posts);
    }
    if posts.is_empty() {
        println!("No posts.");
        return Ok(());
    }
    for post in &posts {
        println!(
            "{}  {}  {} {}",
            post.id.short_id().yellow(),
            post.date.get(..10).unwrap_or(post.date.as_str()).dimmed(),
            post.title.bold(),
            format!("({} blocks)", post.content.len()).dimmed()
        );
    }
    Ok(())
}

/// Resolve a post by id, falling back to slug.
async fn fetch_post(api: &dyn ContentApi, id_or_slug: &str) -> anyhow::Result<Post> {
    match api.get_post(&PostId::from(id_or_slug)).await {
        Ok(post) => Ok(post),
        Err(e) if e.kind() == Some(ErrorKind::NotFound) => api
            .get_post_by_slug(id_or_slug)
            .await
            .with_context(|| format!("no post with id or slug `{id_or_slug}`")),
        Err(e) => Err(e.into()),
    }
}

async fn cmd_show(api: &dyn ContentApi, args: ShowArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let post = fetch_post(api, &args.post).await?;
    match format {
        OutputFormat::Json => print_json(&post),
        OutputFormat::Text => {
            print_post(&post);
            Ok(())
        }
    }
}

async fn cmd_create(api: &dyn ContentApi, args: CreateArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let post = api
        .create_post(&CreatePostRequest {
            title: args.title,
            lead: args.lead,
            tags: args.tags,
        })
        .await?;
    if let OutputFormat::Json = format {
        return print_json(&post);
    }
    println!("{} Created post {}", "✓".green().bold(), post.title.bold());
    println!("  id:   {}", post.id.as_str().yellow());
    println!("  slug: {}", post.slug);
    Ok(())
}

async fn cmd_commit(api: &dyn ContentApi, args: CommitArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let post = fetch_post(api, &args.post).await?;
    let pending = PendingChanges::new();

    for (block_id, file) in &args.edits {
        let block_id = BlockId::from(block_id.as_str());
        let Some(block) = post.block(&block_id) else {
            bail!("post {} has no block {block_id}", post.id);
        };
        let raw = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        pending.stage_raw_edit(block_id.clone(), block.tag(), &raw, &block.content);
    }
    for block_id in &args.deletes {
        pending.stage_delete(BlockId::from(block_id.as_str()));
    }

    let outcome = match pending.commit_all(&post.id, api).await {
        Ok(outcome) => outcome,
        Err(ClientError::Commit(failure)) => {
            for change in &failure.failed {
                eprintln!("  {} {}: {}", "✗".red(), change.block_id, change.error);
            }
            bail!("{failure}");
        }
        Err(e) => return Err(e.into()),
    };

    match format {
        OutputFormat::Json => print_json(&outcome.post),
        OutputFormat::Text => {
            if outcome.is_noop() {
                println!("Nothing to commit.");
                return Ok(());
            }
            println!(
                "{} Saved {} change(s): {} updated, {} deleted",
                "✓".green().bold(),
                outcome.updated.len() + outcome.deleted.len(),
                outcome.updated.len(),
                outcome.deleted.len()
            );
            if let Some(post) = &outcome.post {
                println!();
                print_post(post);
            }
            Ok(())
        }
    }
}

fn cmd_pragma(args: PragmaArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let pragma = decode(&raw);
    if let OutputFormat::Json = format {
        return print_json(&serde_json::json!({
            "options": pragma.options,
            "body": pragma.body,
        }));
    }
    if pragma.options.is_empty() {
        println!("{}", "(no options)".dimmed());
    }
    for (key, value) in &pragma.options {
        println!("{} = {}", key.cyan(), value.yellow());
    }
    println!("{}", "---".dimmed());
    println!("{}", pragma.body);
    Ok(())
}
