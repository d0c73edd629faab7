use std::path::PathBuf;

use clap::{Parser, Subcommand};
use newsdesk_core::Page;

/// Terminal client for the news Q&A, source, search and aggregation services.
#[derive(Parser, Debug)]
#[command(name = "newsdesk", version, about)]
pub struct Cli {
    /// Config file (RON). Defaults to ./newsdesk.ron when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write a log to ./newsdesk.log
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ask a question and get a one-sentence answer
    Ask { question: Vec<String> },
    /// Suggest news sources for a topic
    Sources { question: Vec<String> },
    /// Search one news site for articles
    Search {
        /// Site to search, e.g. https://www.bbc.com
        #[arg(long, default_value = "")]
        url: String,
        #[arg(long, default_value = "")]
        query: String,
        /// direct_scrape, serper or combined
        #[arg(long)]
        method: Option<String>,
    },
    /// Find sources for a question, then articles across them
    Aggregate {
        question: Vec<String>,
        /// Preferred language (not sent; the aggregator has no such parameter)
        #[arg(long)]
        language: Option<String>,
    },
    /// Fetch the raw text of one page
    Scrape {
        #[arg(long, default_value = "")]
        url: String,
    },
    /// Show a site's title, headings, links and search form
    Explore {
        #[arg(long, default_value = "")]
        url: String,
    },
    /// Line-based session with overlapping submissions
    Interactive,
    /// Print the effective configuration as RON
    Config,
}

impl Command {
    /// Page and form fields for the one-shot commands.
    pub fn submission(&self) -> Option<(Page, Vec<(String, String)>)> {
        let field = |name: &str, value: &str| (name.to_string(), value.to_string());
        match self {
            Command::Ask { question } => {
                Some((Page::Ask, vec![field("question", &question.join(" "))]))
            }
            Command::Sources { question } => {
                Some((Page::Sources, vec![field("question", &question.join(" "))]))
            }
            Command::Search { url, query, method } => {
                let mut fields = vec![field("url", url), field("query", query)];
                if let Some(method) = method {
                    fields.push(field("method", method));
                }
                Some((Page::Search, fields))
            }
            Command::Aggregate { question, language } => {
                let mut fields = vec![field("question", &question.join(" "))];
                if let Some(language) = language {
                    fields.push(field("language", language));
                }
                Some((Page::Aggregate, fields))
            }
            Command::Scrape { url } => Some((Page::Scrape, vec![field("url", url)])),
            Command::Explore { url } => Some((Page::Explore, vec![field("url", url)])),
            Command::Interactive | Command::Config => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ask_joins_words() {
        let cli = Cli::try_parse_from(["newsdesk", "ask", "who", "won?"]).unwrap();
        assert_eq!(
            cli.command.submission(),
            Some((Page::Ask, vec![("question".to_string(), "who won?".to_string())]))
        );
    }

    #[test]
    fn search_flags_map_to_fields() {
        let cli = Cli::try_parse_from([
            "newsdesk",
            "--verbose",
            "search",
            "--url",
            "https://www.bbc.com",
            "--query",
            "rates",
            "--method",
            "serper",
        ])
        .unwrap();
        assert!(cli.verbose);
        let (page, fields) = cli.command.submission().unwrap();
        assert_eq!(page, Page::Search);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[2], ("method".to_string(), "serper".to_string()));
    }

    #[test]
    fn missing_question_is_left_for_validation() {
        let cli = Cli::try_parse_from(["newsdesk", "sources"]).unwrap();
        assert_eq!(
            cli.command.submission(),
            Some((Page::Sources, vec![("question".to_string(), String::new())]))
        );
    }

    #[test]
    fn explore_takes_url_flag() {
        let cli =
            Cli::try_parse_from(["newsdesk", "explore", "--url", "https://apnews.com"]).unwrap();
        assert_eq!(
            cli.command.submission(),
            Some((
                Page::Explore,
                vec![("url".to_string(), "https://apnews.com".to_string())]
            ))
        );
    }

    #[test]
    fn config_command_has_no_submission() {
        let cli = Cli::try_parse_from(["newsdesk", "config", "--config", "x.ron"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.ron")));
        assert_eq!(cli.command.submission(), None);
    }
}
