//! Assistant service — keyword routing to canned study-help replies.
//!
//! DESIGN
//! ======
//! No model is called. A request either asks for YouTube search links on a
//! topic, or its lower-cased message is matched against an ordered table of
//! categories. The first category with any keyword as a substring wins; no
//! scoring. Unmatched messages get the default reply with no links.
//!
//! `userRole`, `text`, `history` and `relevantNotes` are accepted on the
//! wire but never influence the reply.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::contact::is_js_whitespace;

const YOUTUBE_SEARCH_URL: &str = "https://www.youtube.com/results?search_query=";
const DEFAULT_USER_ROLE: &str = "student";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRequest {
    pub message: Option<String>,
    pub action: Option<String>,
    pub topic: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub history: Vec<serde_json::Value>,
    #[serde(default = "default_user_role")]
    pub user_role: String,
    pub relevant_notes: Option<serde_json::Value>,
}

fn default_user_role() -> String {
    DEFAULT_USER_ROLE.to_owned()
}

impl Default for AssistantRequest {
    fn default() -> Self {
        Self {
            message: None,
            action: None,
            topic: None,
            text: None,
            history: Vec::new(),
            user_role: default_user_role(),
            relevant_notes: None,
        }
    }
}

/// Actions the assistant knows how to branch on. Unknown actions are inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantAction {
    YouTube,
}

impl AssistantAction {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "youtube" => Some(Self::YouTube),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub text: String,
    pub links: Vec<Link>,
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("message is required")]
    MissingMessage,
}

// =============================================================================
// CATEGORY TABLE
// =============================================================================

pub struct CannedLink {
    pub title: &'static str,
    pub url: &'static str,
}

/// A named keyword bucket mapped to one canned reply.
pub struct Category {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub text: &'static str,
    pub links: &'static [CannedLink],
}

impl Category {
    /// True if any keyword occurs in the (already lower-cased) message.
    #[must_use]
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }

    fn reply(&self) -> AssistantReply {
        AssistantReply { text: self.text.to_owned(), links: to_links(self.links) }
    }
}

/// Categories in evaluation order.
pub const CATEGORIES: &[Category] = &[
    Category {
        name: "study",
        keywords: &["study", "learn", "topic", "subject", "chapter", "notes", "revision"],
        text: "I can help you with your studies! \u{1F4DA}\n\n\
               Here are some effective strategies:\n\n\
               \u{2022} Break down complex topics into smaller chunks\n\
               \u{2022} Use the Pomodoro technique: 25 minutes focused study + 5 minute breaks\n\
               \u{2022} Practice active recall instead of passive reading\n\
               \u{2022} Create mind maps to connect concepts\n\
               \u{2022} Teach the material to someone else\n\n\
               Would you like specific study strategies for any subject?",
        links: &[CannedLink {
            title: "Effective Study Techniques",
            url: "https://www.youtube.com/results?search_query=effective+study+techniques",
        }],
    },
    Category {
        name: "ideas",
        keywords: &["idea", "project", "brainstorm", "creative", "innovative"],
        text: "Great! Here are some project ideas: \u{1F4A1}\n\n\
               **Web Development:**\n\
               \u{2022} Personal portfolio website\n\
               \u{2022} Task management app\n\
               \u{2022} Blog with CMS\n\n\
               **Data Science:**\n\
               \u{2022} Analyze a dataset you're interested in\n\
               \u{2022} Build a prediction model\n\
               \u{2022} Create data visualizations\n\n\
               Which area interests you most?",
        links: &[CannedLink {
            title: "Project Ideas for Students",
            url: "https://www.youtube.com/results?search_query=student+project+ideas",
        }],
    },
];

pub const DEFAULT_REPLY: &str = "I'm here to help with your studies! \u{1F393}\n\n\
     **I can assist with:**\n\
     \u{2022} Study notes and summaries\n\
     \u{2022} Project ideas and brainstorming\n\
     \u{2022} Task organization and planning\n\
     \u{2022} YouTube video recommendations\n\
     \u{2022} Study tips and motivation\n\n\
     What would you like help with today?";

/// Fixed reply shown to the user when the assistant fails internally.
pub const FALLBACK_ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

fn to_links(links: &[CannedLink]) -> Vec<Link> {
    links
        .iter()
        .map(|l| Link { title: l.title.to_owned(), url: l.url.to_owned() })
        .collect()
}

// =============================================================================
// DISPATCH
// =============================================================================

/// First category (in table order) whose keywords appear in the message.
#[must_use]
pub fn classify(message: &str) -> Option<&'static Category> {
    let lowered = message.to_lowercase();
    CATEGORIES.iter().find(|c| c.matches(&lowered))
}

/// Compute the assistant reply for a request.
///
/// # Errors
///
/// Returns `AssistantError::MissingMessage` if the message is absent or blank.
pub fn respond(req: &AssistantRequest) -> Result<AssistantReply, AssistantError> {
    let message = req
        .message
        .as_deref()
        .filter(|m| !m.trim_matches(is_js_whitespace).is_empty())
        .ok_or(AssistantError::MissingMessage)?;

    let action = req.action.as_deref().and_then(AssistantAction::parse);
    let topic = req.topic.as_deref().filter(|t| !t.is_empty());
    if let (Some(AssistantAction::YouTube), Some(topic)) = (action, topic) {
        return Ok(youtube_reply(topic));
    }

    match classify(message) {
        Some(category) => {
            debug!(category = category.name, "assistant matched category");
            Ok(category.reply())
        }
        None => Ok(AssistantReply { text: DEFAULT_REPLY.to_owned(), links: Vec::new() }),
    }
}

// =============================================================================
// YOUTUBE LINKS
// =============================================================================

/// `(title suffix, search suffix)` pairs, in reply order.
const YOUTUBE_VARIANTS: [(&str, &str); 4] = [
    ("Complete Tutorial", "tutorial"),
    ("Explained Simply", "explained"),
    ("For Beginners", "for+beginners"),
    ("Step by Step", "step+by+step"),
];

fn youtube_reply(topic: &str) -> AssistantReply {
    let text = format!(
        "Here are some YouTube video suggestions for \"{topic}\":\n\n\
         1. Complete tutorial and overview\n\
         2. Step-by-step beginner guide\n\
         3. Advanced concepts explained\n\
         4. Practical examples and projects\n\n\
         Click the links below to search for these videos!"
    );
    AssistantReply { text, links: youtube_links(topic) }
}

/// Four YouTube search links for a topic.
#[must_use]
pub fn youtube_links(topic: &str) -> Vec<Link> {
    let query = encode_uri_component(topic);
    YOUTUBE_VARIANTS
        .iter()
        .map(|(title, suffix)| Link {
            title: format!("{topic} - {title}"),
            url: format!("{YOUTUBE_SEARCH_URL}{query}+{suffix}"),
        })
        .collect()
}

/// Characters `encodeURIComponent` leaves alone besides ASCII alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a topic the way JavaScript's `encodeURIComponent` does.
#[must_use]
pub fn encode_uri_component(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

#[cfg(test)]
#[path = "assistant_test.rs"]
mod tests;
