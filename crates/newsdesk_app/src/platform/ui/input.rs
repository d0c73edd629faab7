//! Line commands for the interactive session.
//!
//! `<page> free text` fills the page's primary field, `<page> key=value ...`
//! fills named fields (values may contain spaces), and a bare `<page>`
//! resubmits whatever the form already holds.

use newsdesk_core::Page;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit {
        page: Page,
        fields: Vec<(String, String)>,
    },
    Show(Page),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  ask <question>
  sources <question>
  search url=<url> query=<text> [method=direct_scrape|serper|combined]
  aggregate <question> [language=<lang>]
  scrape <url>
  explore <url>
  show <page>      print a page's current state
  help
  quit";

pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    let Some((head, rest)) = split_head(line) else {
        return Ok(None);
    };

    match head.to_ascii_lowercase().as_str() {
        "help" | "?" => return Ok(Some(Command::Help)),
        "quit" | "exit" => return Ok(Some(Command::Quit)),
        "show" => {
            let page = rest.parse::<Page>().map_err(|err| err.to_string())?;
            return Ok(Some(Command::Show(page)));
        }
        _ => {}
    }

    let page = head.parse::<Page>().map_err(|err| format!("{err}; try 'help'"))?;
    Ok(Some(Command::Submit {
        page,
        fields: parse_fields(page, rest),
    }))
}

fn split_head(line: &str) -> Option<(&str, &str)> {
    if line.is_empty() {
        return None;
    }
    match line.split_once(char::is_whitespace) {
        Some((head, rest)) => Some((head, rest.trim())),
        None => Some((line, "")),
    }
}

fn parse_fields(page: Page, rest: &str) -> Vec<(String, String)> {
    let mut fields: Vec<(String, Vec<&str>)> = Vec::new();
    let mut leading: Vec<&str> = Vec::new();

    for word in rest.split_whitespace() {
        match word.split_once('=') {
            Some((key, value)) if page.fields().iter().any(|f| *f == key) => {
                fields.push((key.to_string(), vec![value]));
            }
            _ => match fields.last_mut() {
                Some((_, words)) => words.push(word),
                None => leading.push(word),
            },
        }
    }

    let mut out = Vec::new();
    if !leading.is_empty() {
        out.push((page.primary_field().to_string(), leading.join(" ")));
    }
    out.extend(
        fields
            .into_iter()
            .map(|(key, words)| (key, words.join(" ").trim().to_string())),
    );
    out
}
