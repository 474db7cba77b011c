//! Outline generator command.

use clap::Args;
use studysync_core::{Config, OutlineGenerator, OutlineRequest, Provider, TemplateBackend};

use super::CmdResult;

#[derive(Args)]
pub struct OutlineArgs {
    /// Topic to outline
    topic: String,
    /// Extra context for the generator
    #[arg(long, default_value = "")]
    context: String,
    /// copilot or gemini (defaults to generator.provider)
    #[arg(long)]
    provider: Option<Provider>,
    /// Elaborate the key point at this index (repeatable)
    #[arg(long)]
    elaborate: Vec<usize>,
    /// Print the whole result as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: OutlineArgs) -> CmdResult {
    let config = Config::load()?;
    let provider = args.provider.unwrap_or(config.generator.provider);
    let request = OutlineRequest::new(args.topic)
        .with_context(args.context)
        .with_provider(provider);
    let generator = OutlineGenerator::new(
        TemplateBackend::with_latency(config.generator_latency()),
        config.generator_timeout(),
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let outline = runtime.block_on(async {
        let mut outline = generator.generate(&request).await?;
        for index in &args.elaborate {
            generator.elaborate(&mut outline, *index).await?;
        }
        Ok::<_, studysync_core::GenerationError>(outline)
    })?;

    if args.json {
        return super::print_json(&outline);
    }

    println!("{}", outline.outline);
    println!("\n## Summary\n\n{}", outline.summary);
    println!("\n## Key Points\n");
    for (index, point) in outline.key_points.iter().enumerate() {
        println!("{index}. {}: {}", point.title, point.content);
        if let Some(elaboration) = &point.elaboration {
            println!("\n{elaboration}\n");
        }
    }
    println!("\n## Videos\n");
    for video in &outline.videos {
        println!("- {} ({}, {}) {}", video.title, video.channel, video.duration, video.url);
    }
    Ok(())
}
