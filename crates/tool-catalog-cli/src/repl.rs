//! Interactive REPL for browsing the tool catalog.
//!
//! Launch with `tool-catalog repl` (or with no subcommand) to enter interactive
//! mode. Type `/help` for available commands, Tab for completion.

use rustyline::completion::{Completer, Pair};
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, ConditionalEventHandler, Config, Editor, Event, EventContext, EventHandler, Helper,
    KeyEvent, RepeatCount,
};

use tool_catalog::CatalogError;

use crate::config::history_path;
use crate::render::{render_bar, render_detail, render_facets, render_list, render_table};
use crate::session::CatalogSession;

/// Available REPL commands.
const COMMANDS: &[(&str, &str)] = &[
    ("/list", "Show tools matching the current filters"),
    ("/search", "Set the search text (empty clears it)"),
    ("/category", "Filter by category, or 'all'"),
    ("/skill", "Filter by skill level, or 'all'"),
    ("/pricing", "Filter by pricing model, or 'all'"),
    ("/reset", "Reset filters and the comparison selection"),
    ("/view", "Show details for a tool"),
    ("/toggle", "Add or remove a tool from the comparison"),
    ("/bar", "Show the comparison bar"),
    ("/compare", "Compare the selected tools side by side"),
    ("/clearcompare", "Clear the comparison selection"),
    ("/urls", "List official URLs of the selected tools"),
    ("/facets", "Show available filter values"),
    ("/load", "Load a catalog .json file"),
    ("/sample", "Load the bundled sample catalog"),
    ("/export", "Write the filtered tools to a .json file"),
    ("/clear", "Clear the screen"),
    ("/help", "Show available commands"),
    ("/exit", "Quit the REPL"),
];

/// Commands whose argument is a tool id.
const ID_COMMANDS: &[&str] = &["/view", "/toggle"];

/// REPL helper for tab completion. Tool ids are refreshed after each command.
#[derive(Default)]
struct CatalogHelper {
    ids: Vec<String>,
    facet_values: Vec<String>,
}

impl Completer for CatalogHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let input = &line[..pos];

        if !input.contains(' ') {
            let matches: Vec<Pair> = COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(input))
                .map(|(cmd, desc)| Pair {
                    display: format!("{cmd:<16} {desc}"),
                    replacement: format!("{cmd} "),
                })
                .collect();
            return Ok((0, matches));
        }

        let parts: Vec<&str> = input.splitn(2, ' ').collect();
        let cmd = parts[0];
        let args = if parts.len() > 1 { parts[1] } else { "" };
        let prefix_start = input.len() - args.len();

        let candidates: Vec<String> = if ID_COMMANDS.contains(&cmd) {
            self.ids.clone()
        } else if matches!(cmd, "/category" | "/skill" | "/pricing") {
            self.facet_values.clone()
        } else if cmd == "/load" {
            json_files_in_cwd()
        } else {
            return Ok((pos, Vec::new()));
        };

        let matches: Vec<Pair> = candidates
            .iter()
            .filter(|c| c.starts_with(args.trim()))
            .map(|c| Pair {
                display: c.clone(),
                replacement: format!("{c} "),
            })
            .collect();
        Ok((prefix_start, matches))
    }
}

fn json_files_in_cwd() -> Vec<String> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(".") {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                    files.push(name.to_string());
                }
            }
        }
    }
    files.sort();
    files
}

impl Hinter for CatalogHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }
        if line.starts_with('/') && !line.contains(' ') {
            for (cmd, _) in COMMANDS {
                if cmd.starts_with(line) && *cmd != line {
                    return Some(cmd[line.len()..].to_string());
                }
            }
        }
        None
    }
}

impl Highlighter for CatalogHelper {}
impl Validator for CatalogHelper {}
impl Helper for CatalogHelper {}

struct TabCompleteOrAcceptHint;

impl ConditionalEventHandler for TabCompleteOrAcceptHint {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext<'_>,
    ) -> Option<Cmd> {
        if ctx.has_hint() {
            Some(Cmd::CompleteHint)
        } else {
            Some(Cmd::Complete)
        }
    }
}

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Run the interactive REPL on an open session.
pub fn run(mut session: CatalogSession) -> anyhow::Result<()> {
    eprintln!();
    eprintln!(
        "  \x1b[32m\u{25c9}\x1b[0m \x1b[1mtool-catalog v{}\x1b[0m \x1b[90m- {} tools from {}\x1b[0m",
        env!("CARGO_PKG_VERSION"),
        session.records().len(),
        session.source()
    );
    eprintln!();
    eprintln!(
        "    Press \x1b[36m/\x1b[0m to browse commands, \x1b[90mTab\x1b[0m to complete, \x1b[90m/exit\x1b[0m to quit."
    );
    eprintln!();

    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let mut rl: Editor<CatalogHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config)?;
    rl.set_helper(Some(CatalogHelper::default()));
    rl.bind_sequence(
        KeyEvent::from('\t'),
        EventHandler::Conditional(Box::new(TabCompleteOrAcceptHint)),
    );

    let hist_path = history_path();
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    let prompt = " \x1b[36mcatalog>\x1b[0m ";

    loop {
        if let Some(helper) = rl.helper_mut() {
            refresh_completions(helper, &session);
        }

        match rl.readline(prompt) {
            Ok(line) => {
                let mut out = String::new();
                let flow = execute(&mut session, &line, &mut out);
                eprint!("{out}");
                if flow == Flow::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("  \x1b[90m(Ctrl+C)\x1b[0m Type \x1b[1m/exit\x1b[0m to quit.");
            }
            Err(ReadlineError::Eof) => {
                eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    let _ = std::fs::create_dir_all(hist_path.parent().unwrap_or(std::path::Path::new(".")));
    let _ = rl.save_history(&hist_path);

    Ok(())
}

fn refresh_completions(helper: &mut CatalogHelper, session: &CatalogSession) {
    let facets = session.facets();
    helper.ids = session.ids();
    helper.facet_values = facets
        .categories
        .iter()
        .chain(&facets.skill_levels)
        .chain(&facets.pricing_models)
        .cloned()
        .chain(std::iter::once("all".to_string()))
        .collect();
}

/// Execute one REPL line against the session, appending output to `out`.
pub fn execute(session: &mut CatalogSession, line: &str, out: &mut String) -> Flow {
    let line = line.trim();
    if line.is_empty() {
        return Flow::Continue;
    }

    let input = line.strip_prefix('/').unwrap_or(line);
    if input.is_empty() {
        cmd_help(out);
        return Flow::Continue;
    }

    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    match cmd {
        "exit" | "quit" => {
            out.push_str("  \x1b[90m\u{2728}\x1b[0m Goodbye!\n");
            return Flow::Exit;
        }
        "help" | "h" | "?" => cmd_help(out),
        "clear" | "cls" => out.push_str("\x1b[2J\x1b[H"),
        "list" | "ls" => cmd_list(session, out),
        "search" | "s" => {
            session.set_query(args);
            cmd_list(session, out);
        }
        "category" | "skill" | "pricing" => {
            let value = if args.is_empty() { "all" } else { args };
            match cmd {
                "category" => session.set_category(value),
                "skill" => session.set_skill_level(value),
                _ => session.set_pricing_model(value),
            }
            cmd_list(session, out);
        }
        "reset" => {
            session.reset();
            cmd_list(session, out);
        }
        "view" => match first_arg(args) {
            Some(id) => report(session.detail(id).map(|d| render_detail(&d)), out),
            None => out.push_str("  Usage: /view <tool-id>\n"),
        },
        "toggle" | "t" => match first_arg(args) {
            Some(id) => cmd_toggle(session, id, out),
            None => out.push_str("  Usage: /toggle <tool-id>\n"),
        },
        "bar" => cmd_bar(session, out),
        "compare" => report(session.open_compare().map(|t| render_table(&t)), out),
        "clearcompare" => {
            session.clear_selection();
            out.push_str("  Comparison cleared.\n");
        }
        "urls" => cmd_urls(session, out),
        "facets" => out.push_str(&render_facets(session.facets())),
        "load" => match first_arg(args) {
            Some(path) => report(
                session
                    .load_file(path)
                    .map(|n| format!("  Loaded: {path} ({n} tools)\n")),
                out,
            ),
            None => out.push_str("  Usage: /load <catalog.json>\n"),
        },
        "sample" => report(
            session
                .load_sample()
                .map(|n| format!("  Loaded bundled sample ({n} tools)\n")),
            out,
        ),
        "export" => match first_arg(args) {
            Some(path) => report(
                session
                    .export(std::path::Path::new(path))
                    .map(|n| format!("  Exported {n} tools to {path}\n")),
                out,
            ),
            None => out.push_str("  Usage: /export <file.json>\n"),
        },
        _ => {
            out.push_str(&format!(
                "  Unknown command '/{cmd}'. Type /help for commands.\n"
            ));
        }
    }

    Flow::Continue
}

fn first_arg(args: &str) -> Option<&str> {
    args.split_whitespace().next()
}

/// Append a successful rendering, or the error as a user-facing message.
fn report(result: Result<String, CatalogError>, out: &mut String) {
    match result {
        Ok(text) => {
            out.push('\n');
            out.push_str(&text);
            out.push('\n');
        }
        Err(e) if e.is_validation() => out.push_str(&format!("  \x1b[33m{e}\x1b[0m\n")),
        Err(e) => out.push_str(&format!("  Error: {e}\n")),
    }
}

fn cmd_help(out: &mut String) {
    out.push_str("\n  Commands:\n\n");
    for (cmd, desc) in COMMANDS {
        out.push_str(&format!("    {cmd:<18} {desc}\n"));
    }
    out.push_str("\n  Tip: Tab completion works for commands, tool ids, filter values and .json files.\n\n");
}

fn cmd_list(session: &CatalogSession, out: &mut String) {
    let filtered = session.filtered();
    out.push('\n');
    out.push_str(&format!(
        "  {} of {} tools\n\n",
        filtered.len(),
        session.records().len()
    ));
    out.push_str(&render_list(&filtered, session.selection()));
    cmd_bar(session, out);
    out.push('\n');
}

fn cmd_toggle(session: &mut CatalogSession, id: &str, out: &mut String) {
    if !session.records().iter().any(|r| r.id == id) && !session.selection().contains(id) {
        out.push_str(&format!("  \x1b[33mTool not found: {id}\x1b[0m\n"));
        return;
    }

    let selected = session.toggle(id);
    out.push_str(&format!(
        "  {} {id}\n",
        if selected { "Selected" } else { "Removed" }
    ));
    cmd_bar(session, out);
}

fn cmd_bar(session: &CatalogSession, out: &mut String) {
    if let Some(bar) = render_bar(&session.chips(), session.selection()) {
        out.push_str(&bar);
        out.push('\n');
    }
}

fn cmd_urls(session: &CatalogSession, out: &mut String) {
    let urls = session.visit_all();
    if urls.is_empty() {
        out.push_str("  No tools selected.\n");
        return;
    }
    for url in urls {
        out.push_str(&format!("  {url}\n"));
    }
}
