//! Validation of recommendation preferences and rendering of the chat prompt

use crate::{
    error::{ApiError, Result},
    models::{BookLength, ChatMessage, RecommendationRequest},
};

/// Persona and formatting rules sent as the system message.
const SYSTEM_PROMPT: &str = "You are an expert librarian and book recommendation specialist \
with deep knowledge of literature across all genres. Answer in plain text only: do not use \
markdown emphasis such as asterisks or underscores, do not use emoji, and present your \
recommendations as a plain numbered list. Do not add any greeting, preamble, or closing remarks.";

/// Preferences that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub genres: Vec<String>,
    pub length: BookLength,
    pub topics: Vec<String>,
}

impl TryFrom<&RecommendationRequest> for Preferences {
    type Error = ApiError;

    fn try_from(request: &RecommendationRequest) -> Result<Self> {
        let genres = present_list(request.genres.as_deref());
        let topics = present_list(request.topics.as_deref());
        let length = request
            .length
            .as_deref()
            .map(str::trim)
            .filter(|length| !length.is_empty());

        let (Some(genres), Some(length), Some(topics)) = (genres, length, topics) else {
            return Err(ApiError::missing_parameters());
        };

        let length = length.parse::<BookLength>().map_err(ApiError::Validation)?;

        Ok(Self {
            genres,
            length,
            topics,
        })
    }
}

/// Non-blank entries of a list, or `None` when nothing usable was supplied.
fn present_list(values: Option<&[String]>) -> Option<Vec<String>> {
    let values: Vec<String> = values?
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();

    (!values.is_empty()).then_some(values)
}

/// Validate the request and render the system and user messages.
///
/// No I/O happens here; a rejected request never reaches the provider.
pub fn build(request: &RecommendationRequest) -> Result<[ChatMessage; 2]> {
    let preferences = Preferences::try_from(request)?;

    Ok([
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(render_user_prompt(&preferences)),
    ])
}

fn render_user_prompt(preferences: &Preferences) -> String {
    format!(
        "Based on the following preferences, recommend exactly 3 books.

Genres: {genres}
Book Length: {length}
Topics: {topics}

Use this format for each book, numbering them 1 to 3:

1. Title by Author
Pages: approximate page count
Summary: a brief summary of 2-3 sentences
Why it matches: the reason it fits the genres, length and topics above

Start directly with the first recommendation and stop after the third.",
        genres = preferences.genres.join(", "),
        length = preferences.length.page_range(),
        topics = preferences.topics.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::MISSING_PARAMETERS, models::Role};

    fn request(genres: &[&str], length: Option<&str>, topics: &[&str]) -> RecommendationRequest {
        let list = |values: &[&str]| Some(values.iter().map(|v| v.to_string()).collect());
        RecommendationRequest {
            genres: list(genres),
            length: length.map(str::to_string),
            topics: list(topics),
        }
    }

    fn assert_missing(request: RecommendationRequest) {
        match build(&request) {
            Err(ApiError::Validation(message)) => assert_eq!(message, MISSING_PARAMETERS),
            other => panic!("expected missing-parameters error, got {:?}", other),
        }
    }

    #[test]
    fn test_renders_system_and_user_messages() {
        let [system, user] =
            build(&request(&["fantasy", "mystery"], Some("short"), &["dragons", "heists"]))
                .unwrap();

        assert_eq!(system.role, Role::System);
        assert_eq!(user.role, Role::User);
        assert!(system.content.contains("plain numbered list"));
        assert!(system.content.contains("emoji"));

        for expected in ["fantasy", "mystery", "dragons", "heists", "under 250 pages"] {
            assert!(
                user.content.contains(expected),
                "user prompt is missing {:?}",
                expected
            );
        }
        assert!(user.content.contains("Genres: fantasy, mystery"));
        assert!(user.content.contains("exactly 3 books"));
    }

    #[test]
    fn test_each_length_resolves_to_its_page_range() {
        for length in BookLength::ALL {
            let [_, user] =
                build(&request(&["history"], Some(length.as_str()), &["rome"])).unwrap();
            assert!(user.content.contains(length.page_range()));
        }
    }

    #[test]
    fn test_prompt_requires_every_recommendation_field() {
        let [_, user] = build(&request(&["sci-fi"], Some("long"), &["space"])).unwrap();

        assert!(user.content.contains("Title by Author"));
        assert!(user.content.contains("Pages:"));
        assert!(user.content.contains("Summary:"));
        assert!(user.content.contains("Why it matches:"));
    }

    #[test]
    fn test_missing_fields_rejected() {
        assert_missing(RecommendationRequest::default());
        assert_missing(RecommendationRequest {
            genres: None,
            ..request(&["a"], Some("short"), &["b"])
        });
        assert_missing(RecommendationRequest {
            length: None,
            ..request(&["a"], Some("short"), &["b"])
        });
        assert_missing(RecommendationRequest {
            topics: None,
            ..request(&["a"], Some("short"), &["b"])
        });
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        assert_missing(request(&[], Some("short"), &["b"]));
        assert_missing(request(&["a"], Some(""), &["b"]));
        assert_missing(request(&["a"], Some("short"), &["  "]));
    }

    #[test]
    fn test_unknown_length_rejected() {
        match build(&request(&["a"], Some("epic"), &["b"])) {
            Err(ApiError::Validation(message)) => {
                assert!(message.contains("epic"));
                assert_ne!(message, MISSING_PARAMETERS);
            }
            other => panic!("expected invalid length error, got {:?}", other),
        }
    }
}
