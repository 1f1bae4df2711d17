use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::debug;

use noql::accordion::{Accordion, Selection};
use noql::content::Catalog;
use noql::feedback::{BlockId, CopyFeedback, SampleKind};
use noql::platform::cli::{HeadlessNavigation, RecordingClipboard, VirtualClock};
use noql::platform::{ClipboardWriter, Navigation, Scheduler};

#[derive(Parser)]
#[command(name = "noql")]
#[command(about = "Headless driver for the No, SQL page", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every topic with its fragment slug
    Routes {
        /// Print machine-readable JSON instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Resolve a fragment to the topic it opens
    Resolve {
        /// Fragment, with or without the leading '#'
        fragment: String,
    },
    /// Validate the compiled-in content
    Check,
    /// Replay a visitor script against the headless page
    Simulate {
        /// Path to the script file
        script: PathBuf,
        /// Fragment the page loads with
        #[arg(long)]
        fragment: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let catalog = Rc::new(Catalog::load().context("content validation failed")?);

    match cli.command {
        Commands::Routes { json } => print_routes(&catalog, json)?,
        Commands::Resolve { fragment } => {
            let fragment = fragment.strip_prefix('#').unwrap_or(&fragment);
            match catalog.resolve(fragment) {
                Some(index) => {
                    // resolve returned the index, so the topic exists
                    let tag = catalog.topic(index).map(|topic| topic.tag).unwrap_or("-");
                    println!("{index}: {tag}");
                }
                None => bail!("no topic matches #{fragment}"),
            }
        }
        Commands::Check => {
            println!("content ok: {} topics, all slugs unique", catalog.len());
        }
        Commands::Simulate { script, fragment } => {
            let source = fs::read_to_string(&script)
                .with_context(|| format!("failed to read {}", script.display()))?;
            simulate(catalog, &source, fragment.as_deref())?;
        }
    }

    Ok(())
}

fn print_routes(catalog: &Catalog, json: bool) -> Result<()> {
    if json {
        let routes: Vec<_> = catalog
            .topics()
            .iter()
            .enumerate()
            .map(|(index, topic)| {
                serde_json::json!({
                    "index": index,
                    "slug": catalog.slug(index),
                    "topic": topic,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&routes)?);
    } else {
        for (index, topic) in catalog.topics().iter().enumerate() {
            println!(
                "{index}  #{slug}  {tag}",
                slug = catalog.slug(index).unwrap_or("-"),
                tag = topic.tag,
            );
        }
    }
    Ok(())
}

/// One line of a simulation script.
///
/// ```text
/// toggle 1                          // press the header of topic 1
/// copy sql-1                        // press the copy button of a sample
/// advance 1500ms                    // let time pass ("ms" optional)
/// navigate #dynamic-schema-needs    // edit the address bar by hand
/// navigate -                        // edit it to a fragmentless address
/// back / forward                    // history buttons
/// state                             // just print the current state
/// ```
#[derive(Debug, PartialEq, Eq)]
enum Directive {
    Toggle(usize),
    Navigate(Option<String>),
    Back,
    Forward,
    Copy(BlockId),
    Advance(u64),
    State,
}

fn parse_script(source: &str) -> Result<Vec<Directive>> {
    let mut directives = Vec::new();
    for (number, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        let directive =
            parse_directive(line).with_context(|| format!("line {}: {line:?}", number + 1))?;
        directives.push(directive);
    }
    Ok(directives)
}

fn parse_directive(line: &str) -> Result<Directive> {
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let directive = match verb {
        "toggle" => Directive::Toggle(rest.parse().context("expected a topic index")?),
        "navigate" => match rest {
            "" => bail!("expected a fragment or '-'"),
            "-" => Directive::Navigate(None),
            fragment => Directive::Navigate(Some(fragment.trim_start_matches('#').to_owned())),
        },
        "back" => Directive::Back,
        "forward" => Directive::Forward,
        "copy" => Directive::Copy(rest.parse()?),
        "advance" => Directive::Advance(
            rest.trim_end_matches("ms")
                .parse()
                .context("expected milliseconds")?,
        ),
        "state" => Directive::State,
        unknown => bail!("unknown directive {unknown:?}"),
    };
    Ok(directive)
}

fn simulate(catalog: Rc<Catalog>, source: &str, initial_fragment: Option<&str>) -> Result<()> {
    let directives = parse_script(source)?;

    let navigation = Rc::new(HeadlessNavigation::with_fragment(initial_fragment));
    let clock = Rc::new(VirtualClock::new());
    let clipboard = Rc::new(RecordingClipboard::new());
    let accordion = Accordion::new(
        Rc::clone(&catalog),
        Rc::clone(&navigation) as Rc<dyn Navigation>,
    );
    let feedback = CopyFeedback::new(
        Rc::clone(&clipboard) as Rc<dyn ClipboardWriter>,
        Rc::clone(&clock) as Rc<dyn Scheduler>,
    );

    println!(
        "t=0ms load -> {}",
        describe(&accordion, &feedback, &navigation),
    );

    for directive in directives {
        debug!("applying {directive:?}");
        match &directive {
            Directive::Toggle(index) => {
                if *index >= catalog.len() {
                    bail!(
                        "toggle {index} is out of range, the page has {} topics",
                        catalog.len(),
                    );
                }
                accordion.toggle(*index);
            }
            Directive::Navigate(fragment) => navigation.navigate(fragment.as_deref()),
            Directive::Back => navigation.back(),
            Directive::Forward => navigation.forward(),
            Directive::Copy(block) => {
                let Some(topic) = catalog.topic(block.topic) else {
                    bail!("copy {block} names a topic that does not exist");
                };
                let text = match block.kind {
                    SampleKind::NoSql => topic.nosql_sample,
                    SampleKind::Sql => topic.sql_sample,
                };
                feedback.copy(*block, text);
            }
            Directive::Advance(ms) => clock.advance_by(*ms),
            Directive::State => {}
        }
        println!(
            "t={}ms {directive:?} -> {}",
            clock.now_ms(),
            describe(&accordion, &feedback, &navigation),
        );
    }

    println!("clipboard writes: {}", clipboard.take_writes().len());
    Ok(())
}

fn describe(
    accordion: &Accordion,
    feedback: &CopyFeedback,
    navigation: &HeadlessNavigation,
) -> String {
    let selection = match accordion.selection() {
        Selection::Closed => "closed".to_owned(),
        Selection::Open(index) => format!(
            "open({index} {})",
            accordion.catalog().slug(index).unwrap_or("-"),
        ),
    };
    let url = match navigation.current_fragment() {
        Some(fragment) => format!("#{fragment}"),
        None => "(no fragment)".to_owned(),
    };
    let copied = match feedback.marked_block() {
        Some(block) => block.to_string(),
        None => "none".to_owned(),
    };
    format!("selection={selection} url={url} copied={copied}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_directive_form() {
        let script = "\
            // warm up\n\
            toggle 1\n\
            copy sql-1\n\
            advance 1500ms\n\
            advance 500\n\
            navigate #dynamic-schema-needs\n\
            navigate -\n\
            back\n\
            forward\n\
            state\n";
        let directives = parse_script(script).unwrap();
        assert_eq!(
            directives,
            [
                Directive::Toggle(1),
                Directive::Copy(BlockId::new(SampleKind::Sql, 1)),
                Directive::Advance(1_500),
                Directive::Advance(500),
                Directive::Navigate(Some("dynamic-schema-needs".to_owned())),
                Directive::Navigate(None),
                Directive::Back,
                Directive::Forward,
                Directive::State,
            ],
        );
    }

    #[test]
    fn unknown_directives_carry_the_line_number() {
        let error = parse_script("toggle 0\nffwd 100\n").unwrap_err();
        assert!(error.to_string().contains("line 2"));
    }

    #[test]
    fn bad_block_ids_are_rejected() {
        assert!(parse_script("copy yaml-1\n").is_err());
        assert!(parse_script("copy sql\n").is_err());
    }
}
