//! Message body classification.
//!
//! A record body is either something a participant typed (`NAME: CONTENTS`)
//! or a notice generated by WhatsApp itself (someone joined, left, changed
//! the group icon, ...). Several of those shapes overlap: `Alice added Bob`
//! and `Alice: added Bob` differ only by a colon. Patterns are therefore
//! tried in a fixed priority order and the first full match wins.
//!
//! # Priority
//!
//! [`MessageType::all`] lists the order. System notices come first, then
//! the two participant placeholders (`<Media omitted>`, missed calls), then
//! the generic `NAME: CONTENTS` fallback. Anything left is
//! [`MessageType::Unknown`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder used when a record has no attributable sender.
pub const NOT_AVAILABLE: &str = "N/A";

/// Classification tag of a record.
///
/// Serializes as the snake_case tag (`subject_name_change`, `added`,
/// `message`, ...), which is also what [`Display`](fmt::Display) prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// `NAME changed the subject from "OLD" to "NEW"`
    SubjectNameChange,
    /// `NAME changed their phone number to a new number. Tap to message or add the new number.`
    PhoneNumChange,
    /// `NAME changed to TARGET`
    PhoneNumChangeFull,
    /// `NAME changed this group's icon`
    GroupIconChange,
    /// `NAME deleted this group's icon`
    GroupIconDelete,
    /// `NAME added TARGET`
    Added,
    /// `NAME left`
    Left,
    /// `You left`
    YouLeft,
    /// `NAME removed TARGET`
    Removed,
    /// `Your security code with NAME changed. Tap to learn more.`
    SecurityCodeChange,
    /// `Your security code with all participants changed. Tap to learn more.`
    SecurityCodeChangeAll,
    /// `NAME turned on disappearing messages. ... NUM days|hours after they're sent.`
    DisappearingEnable,
    /// `NAME turned off disappearing messages.`
    DisappearingDisable,
    /// `NAME started a call`
    CallStart,
    /// `NAME: Missed video call`
    MissedVideoCall,
    /// `NAME: <Media omitted>`
    MediaOmitted,
    /// `NAME: CONTENTS`, an ordinary chat message
    Message,
    /// Nothing matched.
    Unknown,
}

impl MessageType {
    /// All classifiable types in match priority order.
    ///
    /// A shape that is a special case of another comes before it (`You left`
    /// before `NAME left`, `all participants` before any other security-code
    /// contact). Exporters that try the general shape first never produce
    /// `you_left` or `security_code_change_all`: they report `left` with name
    /// `You` and `security_code_change` with name `all participants`.
    ///
    /// [`Unknown`](MessageType::Unknown) is not included: it is what's left
    /// when none of these match.
    pub fn all() -> &'static [MessageType] {
        &[
            MessageType::SubjectNameChange,
            MessageType::PhoneNumChange,
            MessageType::PhoneNumChangeFull,
            MessageType::GroupIconChange,
            MessageType::GroupIconDelete,
            MessageType::Added,
            MessageType::YouLeft,
            MessageType::Left,
            MessageType::Removed,
            MessageType::SecurityCodeChangeAll,
            MessageType::SecurityCodeChange,
            MessageType::DisappearingEnable,
            MessageType::DisappearingDisable,
            MessageType::CallStart,
            MessageType::MissedVideoCall,
            MessageType::MediaOmitted,
            MessageType::Message,
        ]
    }

    /// Returns the full-body regex pattern for this type.
    ///
    /// `NAME` never contains a colon, except inside a security-code notice
    /// where the contact name is free text.
    pub fn pattern(self) -> Option<&'static str> {
        let pattern = match self {
            MessageType::SubjectNameChange => {
                r#"^(?P<name>[^:]+) changed the subject from "(?P<old>.+)" to "(?P<new>.+)"$"#
            }
            MessageType::PhoneNumChange => {
                r"^(?P<name>[^:]+) changed their phone number to a new number\. Tap to message or add the new number\.$"
            }
            MessageType::PhoneNumChangeFull => r"^(?P<name>[^:]+) changed to (?P<target>.+)$",
            MessageType::GroupIconChange => r"^(?P<name>[^:]+) changed this group's icon$",
            MessageType::GroupIconDelete => r"^(?P<name>[^:]+) deleted this group's icon$",
            MessageType::Added => r"^(?P<name>[^:]+) added (?P<target>.+)$",
            MessageType::Left => r"^(?P<name>[^:]+) left$",
            MessageType::YouLeft => r"^You left$",
            MessageType::Removed => r"^(?P<name>[^:]+) removed (?P<target>[^:]+)$",
            MessageType::SecurityCodeChange => {
                r"^Your security code with (?P<name>.+) changed\. Tap to learn more\.$"
            }
            MessageType::SecurityCodeChangeAll => {
                r"^Your security code with all participants changed\. Tap to learn more\.$"
            }
            MessageType::DisappearingEnable => {
                r"^(?P<name>[^:]+) turned on disappearing messages\. All new messages will disappear from this chat (?P<num>[0-9]+) (?P<period>days|hours) after they're sent\.$"
            }
            MessageType::DisappearingDisable => {
                r"^(?P<name>[^:]+) turned off disappearing messages\.$"
            }
            MessageType::CallStart => r"^(?P<name>[^:]+) started a call$",
            MessageType::MissedVideoCall => r"^(?P<name>[^:]+): Missed video call$",
            MessageType::MediaOmitted => r"^(?P<name>[^:]+): <Media omitted>$",
            MessageType::Message => r"(?s)^(?P<name>[^:]+): (?P<contents>.+)$",
            MessageType::Unknown => return None,
        };
        Some(pattern)
    }

    /// Returns the snake_case tag.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::SubjectNameChange => "subject_name_change",
            MessageType::PhoneNumChange => "phone_num_change",
            MessageType::PhoneNumChangeFull => "phone_num_change_full",
            MessageType::GroupIconChange => "group_icon_change",
            MessageType::GroupIconDelete => "group_icon_delete",
            MessageType::Added => "added",
            MessageType::Left => "left",
            MessageType::YouLeft => "you_left",
            MessageType::Removed => "removed",
            MessageType::SecurityCodeChange => "security_code_change",
            MessageType::SecurityCodeChangeAll => "security_code_change_all",
            MessageType::DisappearingEnable => "disappearing_enable",
            MessageType::DisappearingDisable => "disappearing_disable",
            MessageType::CallStart => "call_start",
            MessageType::MissedVideoCall => "missed_video_call",
            MessageType::MediaOmitted => "media_omitted",
            MessageType::Message => "message",
            MessageType::Unknown => "unknown",
        }
    }

    /// Returns `true` for notices generated by WhatsApp rather than typed
    /// by a participant.
    pub fn is_system(self) -> bool {
        !matches!(
            self,
            MessageType::Message | MessageType::MediaOmitted | MessageType::Unknown
        )
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == MessageType::Unknown.as_str() {
            return Ok(MessageType::Unknown);
        }
        MessageType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown message type tag: '{}'", s))
    }
}

static PATTERNS: LazyLock<Vec<(MessageType, Regex)>> = LazyLock::new(|| {
    MessageType::all()
        .iter()
        .filter_map(|&t| t.pattern().map(|p| (t, Regex::new(p).expect("message pattern is valid"))))
        .collect()
});

/// Result of classifying one message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    pub message_type: MessageType,
    /// Named captures of the winning pattern (`name`, `contents`, `old`,
    /// `new`, `target`, `num`, `period`). Empty for `unknown`.
    pub fields: BTreeMap<&'static str, &'a str>,
}

impl<'a> Classification<'a> {
    fn unknown() -> Self {
        Self {
            message_type: MessageType::Unknown,
            fields: BTreeMap::new(),
        }
    }

    /// Returns a captured field.
    pub fn get(&self, field: &str) -> Option<&'a str> {
        self.fields.get(field).copied()
    }

    /// Returns the captured actor name, if the pattern has one.
    pub fn name(&self) -> Option<&'a str> {
        self.get("name")
    }

    /// Returns the captured message contents (plain messages only).
    pub fn contents(&self) -> Option<&'a str> {
        self.get("contents")
    }

    /// Name to put on the final record: the captured name or `"N/A"`.
    pub fn record_name(&self) -> &'a str {
        self.name().unwrap_or(NOT_AVAILABLE)
    }

    /// Message to put on the final record: the captured contents, or the
    /// whole body when the pattern doesn't split one out.
    pub fn record_message(&self, body: &'a str) -> &'a str {
        self.contents().unwrap_or(body)
    }

    pub fn is_unknown(&self) -> bool {
        self.message_type == MessageType::Unknown
    }
}

/// Classifies a fully assembled message body.
///
/// Pure: the same body always produces the same classification.
///
/// # Example
///
/// ```rust
/// use wachat::parsing::{MessageType, classify};
///
/// let c = classify("Alice added Bob");
/// assert_eq!(c.message_type, MessageType::Added);
/// assert_eq!(c.name(), Some("Alice"));
/// assert_eq!(c.get("target"), Some("Bob"));
///
/// assert_eq!(classify("@@garbled@@").message_type, MessageType::Unknown);
/// ```
pub fn classify(body: &str) -> Classification<'_> {
    for (message_type, regex) in PATTERNS.iter() {
        if let Some(caps) = regex.captures(body) {
            let fields = regex
                .capture_names()
                .flatten()
                .filter_map(|field| caps.name(field).map(|m| (field, m.as_str())))
                .collect();
            return Classification {
                message_type: *message_type,
                fields,
            };
        }
    }
    Classification::unknown()
}
