//! Text command parsing
//!
//! Commands are plain chat messages. The first whitespace-separated token is
//! the keyword (case-insensitive, `/cmd@botname` suffix stripped); the rest of
//! the message holds the target, duration and reason. Parsing decides a
//! [`Command`] up front so handlers never look at raw text.

use chrono::Duration;
use woxl_core::{parse_duration, RoleLevel, UserId};

/// Who a command is aimed at, before the reply author is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetArg {
    /// Author of the replied-to message
    Reply,
    /// Numeric id given as an argument
    Id(UserId),
    /// `@username`; the bot has no way to resolve it
    Username(String),
    /// Missing or not an id
    Unresolved,
}

impl TargetArg {
    /// Split the target off the arguments.
    ///
    /// A reply always wins and leaves the arguments untouched. Otherwise the
    /// first token is consumed as the target, so an id never leaks into the
    /// reason that follows it.
    pub fn split(args: &str, has_reply: bool) -> (Self, &str) {
        if has_reply {
            return (Self::Reply, args.trim_start());
        }

        match next_token(args) {
            None => (Self::Unresolved, ""),
            Some((token, rest)) => {
                let target = if let Ok(id) = UserId::parse(token) {
                    Self::Id(id)
                } else if let Some(name) = token.strip_prefix('@').filter(|n| !n.is_empty()) {
                    Self::Username(name.to_string())
                } else {
                    Self::Unresolved
                };
                (target, rest)
            }
        }
    }
}

/// A recognized chat command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    ListAdmins,
    AssignRole {
        level: RoleLevel,
        target: TargetArg,
        reason: Option<String>,
    },
    RevokeRole {
        target: TargetArg,
    },
    Promote {
        target: TargetArg,
    },
    Demote {
        target: TargetArg,
    },
    /// `None` when the keyword came without a name
    SetNick {
        nick: Option<String>,
    },
    /// `None` shows the caller's own nick
    ShowNick {
        target: Option<TargetArg>,
    },
    IssueWarn {
        target: TargetArg,
        duration: Option<Duration>,
        reason: Option<String>,
    },
    RevokeWarns {
        target: TargetArg,
    },
    ListWarns,
}

impl Command {
    /// Parse a message text; `None` means the message is not a command.
    pub fn parse(text: &str, has_reply: bool) -> Option<Self> {
        let (raw_keyword, args) = next_token(text)?;
        let keyword = normalize_keyword(raw_keyword);
        let whole_message = args.is_empty();

        let command = match keyword.as_str() {
            "/start" => Self::Start,
            "/admins" => Self::ListAdmins,
            "админы" | "?админ" if whole_message => Self::ListAdmins,
            "?пред" | "?варн" if whole_message => Self::ListWarns,

            "+админ" => assign(RoleLevel::Admin, args, has_reply),
            "+модер" => assign(RoleLevel::Moderator, args, has_reply),
            "выдать" => {
                let (level, rest) = explicit_level(args, has_reply);
                assign(level.unwrap_or(RoleLevel::Admin), rest, has_reply)
            }
            "-админ" | "снять" => Self::RevokeRole {
                target: TargetArg::split(args, has_reply).0,
            },
            "повысить" | "повышение" => Self::Promote {
                target: TargetArg::split(args, has_reply).0,
            },
            "понизить" | "понижение" => Self::Demote {
                target: TargetArg::split(args, has_reply).0,
            },

            "ник" => Self::SetNick {
                nick: non_empty(args),
            },
            "?ник" => Self::ShowNick {
                target: (has_reply || !whole_message).then(|| TargetArg::split(args, has_reply).0),
            },

            "варн" | "+варн" | "пред" | "+пред" => {
                let (target, rest) = TargetArg::split(args, has_reply);
                // A zero duration means nothing; the token stays in the reason
                let parsed = next_token(rest).and_then(|(token, after)| {
                    parse_duration(token)
                        .filter(|d| *d > Duration::zero())
                        .map(|d| (d, after))
                });
                let (duration, reason) = match parsed {
                    Some((duration, after)) => (Some(duration), after),
                    None => (None, rest),
                };
                Self::IssueWarn {
                    target,
                    duration,
                    reason: non_empty(reason),
                }
            }
            "-варн" | "-пред" => Self::RevokeWarns {
                target: TargetArg::split(args, has_reply).0,
            },

            _ => return None,
        };

        Some(command)
    }
}

fn assign(level: RoleLevel, args: &str, has_reply: bool) -> Command {
    let (target, rest) = TargetArg::split(args, has_reply);
    Command::AssignRole {
        level,
        target,
        reason: non_empty(rest),
    }
}

/// Leading `1`..`4` for `выдать`.
///
/// The digit is a level only when something still identifies the target: a
/// reply, or another token after it. `выдать 3` alone targets user id 3.
fn explicit_level(args: &str, has_reply: bool) -> (Option<RoleLevel>, &str) {
    let Some((token, rest)) = next_token(args) else {
        return (None, args);
    };

    let level = match token {
        "1" | "2" | "3" | "4" if has_reply || !rest.is_empty() => {
            token.parse().ok().and_then(RoleLevel::from_i16)
        }
        _ => None,
    };

    match level {
        Some(level) => (Some(level), rest),
        None => (None, args),
    }
}

/// Split off the first whitespace-separated token.
///
/// The remainder has leading whitespace removed but keeps its inner spacing.
pub fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }

    match s.find(char::is_whitespace) {
        Some(end) => Some((&s[..end], s[end..].trim_start())),
        None => Some((s, "")),
    }
}

/// Lower-case a keyword and drop the `@botname` suffix of slash commands
fn normalize_keyword(token: &str) -> String {
    let lowered = token.to_lowercase();
    if lowered.starts_with('/') {
        if let Some((cmd, _bot)) = lowered.split_once('@') {
            return cmd.to_string();
        }
    }
    lowered
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
