use anyhow::Result;
use std::fmt::Write as _;
use std::io::{self, BufRead, BufReader, Write};
use tracing::warn;

use crate::groups::{self, Category};
use crate::search::{SearchCoordinator, SearchRequest, SearchState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Empty,
    Help,
    Quit,
    Categories,
    Category(Option<Category>),
    Search,
    List,
    Open(usize),
    Query(String),
    Invalid(String),
}

pub fn help_text() -> &'static str {
    "/help              Show help\n/categories        List categories\n/category <name>   Filter by category (/category none to clear)\n/search            Search again with the current query\n/list              Show the current results\n/open <n>          Open the invite link of result n\n/quit              Quit\n<text>             Search for <text>"
}

pub fn parse_command(line: &str) -> CliCommand {
    let line = line.trim();
    if line.is_empty() {
        return CliCommand::Empty;
    }
    if !line.starts_with('/') {
        return CliCommand::Query(line.to_string());
    }
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((c, r)) => (c, r.trim()),
        None => (line, ""),
    };
    match cmd {
        "/help" => CliCommand::Help,
        "/quit" | "/exit" => CliCommand::Quit,
        "/categories" => CliCommand::Categories,
        "/search" => CliCommand::Search,
        "/list" => CliCommand::List,
        "/category" => match rest {
            "" => CliCommand::Invalid("usage: /category <name|none>".into()),
            "none" | "all" => CliCommand::Category(None),
            name => match name.parse::<Category>() {
                Ok(c) => CliCommand::Category(Some(c)),
                Err(e) => CliCommand::Invalid(e.to_string()),
            },
        },
        "/open" => match rest.parse::<usize>() {
            Ok(n) if n >= 1 => CliCommand::Open(n),
            _ => CliCommand::Invalid("usage: /open <n>".into()),
        },
        other => CliCommand::Invalid(format!("unknown command: {other} (try /help)")),
    }
}

/// Text block for the current results: heading plus numbered cards, or
/// the empty-state message.
pub fn render_results(state: &SearchState) -> String {
    let mut out = String::new();
    if state.groups.is_empty() {
        let _ = writeln!(out, "{}", groups::EMPTY_STATE_TITLE);
        let _ = writeln!(out, "{}", groups::EMPTY_STATE_HINT);
        return out;
    }
    let _ = writeln!(out, "{}", groups::results_heading(state.groups.len()));
    for (i, group) in state.groups.iter().enumerate() {
        let _ = writeln!(out);
        for (j, line) in groups::card_lines(group).iter().enumerate() {
            if j == 0 {
                let _ = writeln!(out, "{:>2}. {line}", i + 1);
            } else {
                let _ = writeln!(out, "    {line}");
            }
        }
    }
    out
}

fn describe(req: &SearchRequest) -> String {
    match req.category {
        Some(c) => format!("[searching: {} | {}]", req.instruction, c),
        None => format!("[searching: {}]", req.instruction),
    }
}

async fn run_and_print(coordinator: &mut SearchCoordinator, req: SearchRequest) {
    println!("{}", describe(&req));
    let state = coordinator.run(req).await;
    print!("{}", render_results(state));
}

pub async fn run_cli_loop(coordinator: &mut SearchCoordinator) -> Result<()> {
    println!("whatsgroup-finder (CLI) - type /help for commands");
    println!("{}", groups::DISCLAIMER);
    if let Some(req) = coordinator.mount() {
        run_and_print(coordinator, req).await;
    }

    let stdin = io::stdin();
    let reader = BufReader::new(stdin).lines();
    print!("> ");
    io::stdout().flush()?;
    for line in reader {
        let line = line?;
        match parse_command(&line) {
            CliCommand::Empty => {}
            CliCommand::Help => println!("{}", help_text()),
            CliCommand::Quit => break,
            CliCommand::Categories => {
                for c in Category::ALL {
                    let marker = if coordinator.state().category == Some(c) {
                        "*"
                    } else {
                        " "
                    };
                    println!("{marker} {:<18} ({})", c.label(), c.slug());
                }
            }
            CliCommand::Category(c) => match coordinator.select_category(c) {
                Some(req) => run_and_print(coordinator, req).await,
                None => println!(
                    "[category: {}]",
                    c.map(|c| c.label()).unwrap_or("none")
                ),
            },
            CliCommand::Search => {
                let req = coordinator.submit();
                run_and_print(coordinator, req).await;
            }
            CliCommand::List => print!("{}", render_results(coordinator.state())),
            CliCommand::Open(n) => match coordinator.state().groups.get(n - 1) {
                Some(g) if !g.invite_link.trim().is_empty() => {
                    if let Err(e) = crate::utils::open_url(&g.invite_link) {
                        warn!(error = %e, "open invite link failed");
                        eprintln!("open failed: {e}");
                    }
                }
                Some(_) => eprintln!("result {n} has no invite link"),
                None => eprintln!("no result {n}"),
            },
            CliCommand::Query(q) => {
                coordinator.set_query(q);
                let req = coordinator.submit();
                run_and_print(coordinator, req).await;
            }
            CliCommand::Invalid(msg) => eprintln!("{msg}"),
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::Group;

    #[test]
    fn plain_text_is_a_query() {
        assert_eq!(
            parse_command("  Investimentos  "),
            CliCommand::Query("Investimentos".into())
        );
        assert_eq!(parse_command("   "), CliCommand::Empty);
    }

    #[test]
    fn parses_slash_commands() {
        assert_eq!(parse_command("/help"), CliCommand::Help);
        assert_eq!(parse_command("/exit"), CliCommand::Quit);
        assert_eq!(
            parse_command("/category Health & Fitness"),
            CliCommand::Category(Some(Category::HealthFitness))
        );
        assert_eq!(parse_command("/category none"), CliCommand::Category(None));
        assert_eq!(parse_command("/open 3"), CliCommand::Open(3));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(matches!(parse_command("/open 0"), CliCommand::Invalid(_)));
        assert!(matches!(parse_command("/open x"), CliCommand::Invalid(_)));
        assert!(matches!(parse_command("/category"), CliCommand::Invalid(_)));
        assert_eq!(
            parse_command("/category Astrology"),
            CliCommand::Invalid("unknown category: Astrology".into())
        );
        assert!(matches!(parse_command("/nope"), CliCommand::Invalid(_)));
    }

    #[test]
    fn empty_results_render_empty_state() {
        let out = render_results(&SearchState::default());
        assert!(out.starts_with("No groups found\n"));
        assert!(out.contains("more generic"));
    }

    #[test]
    fn results_render_heading_and_numbered_cards() {
        let state = SearchState {
            groups: (1..=20)
                .map(|i| Group {
                    id: i.to_string(),
                    name: format!("Grupo {i}"),
                    invite_link: format!("https://chat.whatsapp.com/{i}"),
                    ..Group::default()
                })
                .collect(),
            ..SearchState::default()
        };
        let out = render_results(&state);
        assert!(out.starts_with("20 Groups Found\n"));
        assert!(out.contains(" 1. Grupo 1\n"));
        assert!(out.contains("20. Grupo 20\n"));
        assert!(out.contains("    https://chat.whatsapp.com/20\n"));
    }
}
