use crate::error::ParseError;
use crate::task_model::{DateStamp, Task};
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

const BY_MARKER: &str = "/by";
const FROM_MARKER: &str = "/from";
const TO_MARKER: &str = "/to";

// yyyy-MM-dd
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<y>\d{4})-(?P<m>\d{2})-(?P<d>\d{2})$").unwrap());
// yyyy-MM-dd HHmm
static DATE_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<y>\d{4})-(?P<m>\d{2})-(?P<d>\d{2}) (?P<hh>\d{2})(?P<mm>\d{2})$").unwrap()
});

/// The leading word of an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandWord {
    Bye,
    List,
    Todo,
    Deadline,
    Event,
    Mark,
    Unmark,
    Delete,
    Find,
    Help,
}

impl CommandWord {
    fn from_word(word: &str) -> Option<Self> {
        let parsed = match word.to_lowercase().as_str() {
            "bye" => CommandWord::Bye,
            "list" => CommandWord::List,
            "todo" => CommandWord::Todo,
            "deadline" => CommandWord::Deadline,
            "event" => CommandWord::Event,
            "mark" => CommandWord::Mark,
            "unmark" => CommandWord::Unmark,
            "delete" => CommandWord::Delete,
            "find" => CommandWord::Find,
            "help" => CommandWord::Help,
            _ => return None,
        };
        Some(parsed)
    }

    pub fn usage(&self) -> &'static str {
        match self {
            CommandWord::Bye => "bye",
            CommandWord::List => "list",
            CommandWord::Todo => "todo <description>",
            CommandWord::Deadline => "deadline <description> /by <yyyy-mm-dd> [HHmm]",
            CommandWord::Event => {
                "event <description> /from <yyyy-mm-dd> [HHmm] /to <yyyy-mm-dd> [HHmm]"
            }
            CommandWord::Mark => "mark <n>",
            CommandWord::Unmark => "unmark <n>",
            CommandWord::Delete => "delete <n>",
            CommandWord::Find => "find <keyword>",
            CommandWord::Help => "help",
        }
    }
}

/// A fully validated line of input, ready to run against a task list.
///
/// Task numbers are kept 1-based as typed; they are range-checked when the
/// command runs, since only then is the list size known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bye,
    List,
    Help,
    Add(Task),
    Mark(usize),
    Unmark(usize),
    Delete(usize),
    Find(String),
}

pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (trimmed, ""),
    };
    let command_word =
        CommandWord::from_word(word).ok_or_else(|| ParseError::UnknownCommand(word.to_string()))?;

    let command = match command_word {
        CommandWord::Bye => Command::Bye,
        CommandWord::List => Command::List,
        CommandWord::Help => Command::Help,
        CommandWord::Todo => Command::Add(parse_todo(rest)?),
        CommandWord::Deadline => Command::Add(parse_deadline(rest)?),
        CommandWord::Event => Command::Add(parse_event(rest)?),
        CommandWord::Mark => Command::Mark(parse_index(rest, command_word)?),
        CommandWord::Unmark => Command::Unmark(parse_index(rest, command_word)?),
        CommandWord::Delete => Command::Delete(parse_index(rest, command_word)?),
        CommandWord::Find => {
            let keyword = rest.trim();
            if keyword.is_empty() {
                return Err(ParseError::EmptyKeyword);
            }
            Command::Find(keyword.to_string())
        }
    };
    debug!(?command, "parsed input line");
    Ok(command)
}

fn check_description(description: &str, command: CommandWord) -> Result<(), ParseError> {
    // '|' is the field separator of the save file.
    if description.contains('|') {
        return Err(ParseError::ReservedCharacter(command));
    }
    Ok(())
}

fn parse_todo(args: &str) -> Result<Task, ParseError> {
    let description = args.trim();
    if description.is_empty() {
        return Err(ParseError::EmptyTodo);
    }
    check_description(description, CommandWord::Todo)?;
    Ok(Task::todo(description))
}

fn parse_deadline(args: &str) -> Result<Task, ParseError> {
    let args = args.trim();
    if args.is_empty() {
        return Err(ParseError::EmptyDeadline);
    }
    let by_pos = args.find(BY_MARKER).ok_or(ParseError::MissingBy)?;

    let description = args[..by_pos].trim();
    let by_raw = args[by_pos + BY_MARKER.len()..].trim();
    if description.is_empty() {
        return Err(ParseError::MissingDeadlineDescription);
    }
    if by_raw.is_empty() {
        return Err(ParseError::MissingDeadlineDate);
    }
    check_description(description, CommandWord::Deadline)?;

    let by = parse_date_time(by_raw).ok_or_else(|| ParseError::InvalidDateTime {
        command: CommandWord::Deadline,
        raw: by_raw.to_string(),
    })?;
    Ok(Task::deadline(description, by))
}

fn parse_event(args: &str) -> Result<Task, ParseError> {
    let args = args.trim();
    if args.is_empty() {
        return Err(ParseError::EmptyEvent);
    }
    let (from_pos, to_pos) = match (args.find(FROM_MARKER), args.find(TO_MARKER)) {
        (Some(from_pos), Some(to_pos)) if to_pos > from_pos => (from_pos, to_pos),
        _ => return Err(ParseError::MissingFromTo),
    };

    let description = args[..from_pos].trim();
    let from_raw = args[from_pos + FROM_MARKER.len()..to_pos].trim();
    let to_raw = args[to_pos + TO_MARKER.len()..].trim();
    if description.is_empty() {
        return Err(ParseError::MissingEventDescription);
    }
    if from_raw.is_empty() {
        return Err(ParseError::MissingEventStart);
    }
    if to_raw.is_empty() {
        return Err(ParseError::MissingEventEnd);
    }
    check_description(description, CommandWord::Event)?;

    let parse_endpoint = |raw: &str| {
        parse_date_time(raw).ok_or_else(|| ParseError::InvalidDateTime {
            command: CommandWord::Event,
            raw: raw.to_string(),
        })
    };
    let from = parse_endpoint(from_raw)?;
    let to = parse_endpoint(to_raw)?;
    Ok(Task::event(description, from, to))
}

/// Parses a 1-based task number. Only plain ASCII digits are accepted.
pub fn parse_index(arg: &str, command: CommandWord) -> Result<usize, ParseError> {
    let s = arg.trim();
    if s.is_empty() {
        return Err(ParseError::MissingIndex(command));
    }
    let not_a_number = || ParseError::NotANumber {
        command,
        raw: s.to_string(),
    };
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_a_number());
    }
    s.parse::<usize>().map_err(|_| not_a_number())
}

/// Parses `yyyy-MM-dd` or `yyyy-MM-dd HHmm`.
///
/// Returns `None` for anything else, including well-shaped literals naming an
/// impossible date or time such as `2026-02-30` or `2026-02-05 2460`.
pub fn parse_date_time(raw: &str) -> Option<DateStamp> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if s.contains(' ') {
        let caps = DATE_TIME_RE.captures(s)?;
        let date = date_from_captures(&caps)?;
        let time = NaiveTime::from_hms_opt(caps["hh"].parse().ok()?, caps["mm"].parse().ok()?, 0)?;
        return Some(DateStamp::with_time(date.and_time(time)));
    }

    let caps = DATE_RE.captures(s)?;
    date_from_captures(&caps).map(DateStamp::date_only)
}

fn date_from_captures(caps: &regex::Captures) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        caps["y"].parse().ok()?,
        caps["m"].parse().ok()?,
        caps["d"].parse().ok()?,
    )
}
