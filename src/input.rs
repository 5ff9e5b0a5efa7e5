//! Interactive collection of the API token and query range
//!
//! Parsing is kept in small pure functions; the prompt loops sit on top of
//! the [`Terminal`] trait so they can run against a real line editor or a
//! scripted one in tests.

use crate::config::RangeDefaults;
use crate::credential::ApiToken;
use crate::error::{Result, TodoistLogError};
use crate::todoist::TimeRange;
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
#[cfg(test)]
use std::collections::VecDeque;

const DATE_FORMAT: &str = "%y%m%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a `YYMMDD` date
///
/// Two-digit years `00`-`68` fall in the 2000s and `69`-`99` in the 1900s.
///
/// # Examples
///
/// ```
/// use chrono::{Datelike, NaiveDate};
/// use todoist_log::input::parse_date;
///
/// assert_eq!(
///     parse_date("230120").unwrap(),
///     NaiveDate::from_ymd_opt(2023, 1, 20).unwrap()
/// );
/// assert_eq!(parse_date("690101").unwrap().year(), 1969);
/// assert!(parse_date("2023-01-20").is_err());
/// ```
pub fn parse_date(input: &str) -> std::result::Result<NaiveDate, TodoistLogError> {
    let input = input.trim();
    if input.len() != 6 || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TodoistLogError::InvalidDate(input.to_string()));
    }
    let invalid = || TodoistLogError::InvalidDate(input.to_string());
    let date = NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| invalid())?;
    // chrono pivots `%y` at 70; year 69 belongs to the 1900s
    if date.year() == 2069 {
        return date.with_year(1969).ok_or_else(invalid);
    }
    Ok(date)
}

/// Parse an `HH:MM:SS` time
pub fn parse_time(input: &str) -> std::result::Result<NaiveTime, TodoistLogError> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, TIME_FORMAT)
        .map_err(|_| TodoistLogError::InvalidTime(input.to_string()))
}

/// Parse a full `YYYY-MM-DDTHH:MM:SS` timestamp
pub fn parse_timestamp(input: &str) -> std::result::Result<NaiveDateTime, TodoistLogError> {
    let input = input.trim();
    NaiveDateTime::parse_from_str(input, TIMESTAMP_FORMAT)
        .map_err(|_| TodoistLogError::InvalidTimestamp(input.to_string()))
}

/// Combine a date and a time into the timestamp form the API expects
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use todoist_log::input::format_timestamp;
///
/// let date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
/// let time = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
/// assert_eq!(format_timestamp(date, time), "2023-01-02T23:59:59");
/// ```
pub fn format_timestamp(date: NaiveDate, time: NaiveTime) -> String {
    date.and_time(time).format(TIMESTAMP_FORMAT).to_string()
}

/// `today` minus `days_ago` days, saturating at the earliest representable date
pub fn default_date(today: NaiveDate, days_ago: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(days_ago)))
        .unwrap_or(NaiveDate::MIN)
}

/// Line-oriented terminal used by the prompts
pub trait Terminal {
    /// Show `prompt` and read one line of input
    ///
    /// # Errors
    ///
    /// Returns error when input is closed (EOF or interrupt)
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Show an informational message
    fn say(&mut self, message: &str);
}

/// [`Terminal`] backed by a `rustyline` editor on stdin/stdout
pub struct ConsoleTerminal {
    editor: rustyline::DefaultEditor,
}

impl ConsoleTerminal {
    /// Create a console terminal
    ///
    /// # Errors
    ///
    /// Returns error if the line editor cannot be initialized
    pub fn new() -> Result<Self> {
        let editor = rustyline::DefaultEditor::new().map_err(TodoistLogError::from)?;
        Ok(Self { editor })
    }
}

impl Terminal for ConsoleTerminal {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let line = self
            .editor
            .readline(prompt)
            .map_err(TodoistLogError::from)?;
        Ok(line)
    }

    fn say(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// [`Terminal`] that replays canned input and records everything shown
///
/// Reading past the end of the script is reported as closed input.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    input: VecDeque<String>,
    /// Prompts shown, in order
    pub prompts: Vec<String>,
    /// Messages shown, in order
    pub messages: Vec<String>,
}

#[cfg(test)]
impl ScriptedTerminal {
    /// Create a terminal that answers prompts with `lines` in order
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
impl Terminal for ScriptedTerminal {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.input.pop_front().ok_or_else(|| {
            TodoistLogError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed",
            ))
            .into()
        })
    }

    fn say(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Ask for a `YYMMDD` date until one parses; empty input takes the default
pub fn prompt_date(
    term: &mut impl Terminal,
    label: &str,
    today: NaiveDate,
    days_ago: u32,
) -> Result<NaiveDate> {
    let prompt = format!(
        "{} (YYMMDD)? (Enter for default: {} day(s) ago): ",
        label, days_ago
    );
    loop {
        let line = term.read_line(&prompt)?;
        if line.is_empty() {
            return Ok(default_date(today, days_ago));
        }
        match parse_date(&line) {
            Ok(date) => return Ok(date),
            Err(e) => {
                tracing::debug!("Rejected date input: {}", e);
                term.say("That didn't work. Ensure correct input format: YYMMDD.");
            }
        }
    }
}

/// Ask for an `HH:MM:SS` time until one parses; empty input takes the default
pub fn prompt_time(term: &mut impl Terminal, label: &str, default: &str) -> Result<NaiveTime> {
    let prompt = format!(
        "{} (HH:MM:SS)? (Enter for default: {}): ",
        label, default
    );
    loop {
        let line = term.read_line(&prompt)?;
        let candidate = if line.is_empty() {
            default
        } else {
            line.as_str()
        };
        match parse_time(candidate) {
            Ok(time) => return Ok(time),
            Err(e) => {
                tracing::debug!("Rejected time input: {}", e);
                term.say("That didn't work. Ensure correct input format: HH:MM:SS.");
            }
        }
    }
}

/// Ask for the API token until a non-blank one is entered
pub fn prompt_token(term: &mut impl Terminal) -> Result<ApiToken> {
    loop {
        let line = term.read_line("Enter your Todoist API token: ")?;
        if let Some(token) = ApiToken::new(line) {
            return Ok(token);
        }
        term.say("The API token cannot be empty.");
    }
}

/// Values supplied up front that skip the matching prompts
#[derive(Debug, Clone, Default)]
pub struct InputOverrides {
    /// API token
    pub token: Option<String>,
    /// Range start as `YYYY-MM-DDTHH:MM:SS`
    pub since: Option<String>,
    /// Range end as `YYYY-MM-DDTHH:MM:SS`
    pub until: Option<String>,
}

impl From<&crate::cli::Cli> for InputOverrides {
    fn from(cli: &crate::cli::Cli) -> Self {
        Self {
            token: cli.token.clone(),
            since: cli.since.clone(),
            until: cli.until.clone(),
        }
    }
}

/// Everything one export run needs from the user
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Credential sent with every page request
    pub token: ApiToken,
    /// Query range
    pub range: TimeRange,
}

/// Collect the token and range, prompting for anything not overridden
///
/// Prompt order is token, start date, start time, end date, end time.
/// `since <= until` is not checked.
///
/// # Errors
///
/// Returns error if input is closed or an override timestamp is malformed
pub fn collect_request(
    term: &mut impl Terminal,
    defaults: &RangeDefaults,
    today: NaiveDate,
    overrides: &InputOverrides,
) -> Result<ExportRequest> {
    let token = match overrides.token.as_deref().and_then(|t| ApiToken::new(t)) {
        Some(token) => token,
        None => prompt_token(term)?,
    };

    let since = match &overrides.since {
        Some(raw) => parse_timestamp(raw)?,
        None => {
            let date = prompt_date(term, "Start date", today, defaults.start_days_ago)?;
            let time = prompt_time(term, "Start time", &defaults.start_time)?;
            date.and_time(time)
        }
    };

    let until = match &overrides.until {
        Some(raw) => parse_timestamp(raw)?,
        None => {
            let date = prompt_date(term, "End date", today, defaults.end_days_ago)?;
            let time = prompt_time(term, "End time", &defaults.end_time)?;
            date.and_time(time)
        }
    };

    Ok(ExportRequest {
        token,
        range: TimeRange::new(since, until),
    })
}
