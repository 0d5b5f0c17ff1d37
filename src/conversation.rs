//! Per-chat conversation state machine.
//!
//! The transition function is pure: it mutates the session and tells the
//! caller what to do next, so the whole flow is testable without a live bot.

use std::collections::HashMap;

/// Keyboard label that ends the conversation.
pub const DONE_LABEL: &str = "Done";

/// What the user is searching for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    RecipeSearch,
    WinePairing,
}

impl Category {
    /// Reply-keyboard label, also matched against incoming text.
    pub fn label(self) -> &'static str {
        match self {
            Self::RecipeSearch => "Find a recipe",
            Self::WinePairing => "Choose a wine",
        }
    }

    pub fn from_label(text: &str) -> Option<Self> {
        match text {
            t if t == Self::RecipeSearch.label() => Some(Self::RecipeSearch),
            t if t == Self::WinePairing.label() => Some(Self::WinePairing),
            _ => None,
        }
    }

    /// What to ask the user once this category is picked.
    fn ask(self) -> &'static str {
        match self {
            Self::RecipeSearch => "Send me a list of ingredients you have in your fridge, please",
            Self::WinePairing => "Send me a meal you are going to have and I recommend you a wine",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ChoosingCategory,
    AwaitingInput(Category),
}

/// Side effect the caller should perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send this prompt and wait for free text.
    Prompt(String),
    /// Run the lookup for `category` with the user's query, then show the menu again.
    Lookup { category: Category, query: String },
    /// Conversation is over; drop the session.
    End,
    /// Not something we respond to in the current state.
    Ignore,
}

/// Transient per-chat state. Created on /start, dropped on "Done".
#[derive(Debug)]
pub struct Session {
    state: State,
    /// Free-text answers given so far, keyed by the category they answered.
    answers: HashMap<Category, String>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: State::ChoosingCategory,
            answers: HashMap::new(),
        }
    }

    /// Advance the conversation with one incoming message.
    pub fn advance(&mut self, text: &str) -> Action {
        if text == DONE_LABEL {
            self.state = State::ChoosingCategory;
            self.answers.clear();
            return Action::End;
        }

        match self.state {
            State::ChoosingCategory => match Category::from_label(text) {
                Some(category) => {
                    self.state = State::AwaitingInput(category);
                    Action::Prompt(format!(
                        "Do you want to {}? I would love to help you with that!\n{}",
                        category.label().to_lowercase(),
                        category.ask(),
                    ))
                }
                // Free text before a category is picked is deliberately ignored.
                None => Action::Ignore,
            },
            State::AwaitingInput(category) => {
                self.answers.insert(category, text.to_string());
                self.state = State::ChoosingCategory;
                Action::Lookup {
                    category,
                    query: text.to_string(),
                }
            }
        }
    }

    #[cfg(test)]
    fn answer(&self, category: Category) -> Option<&str> {
        self.answers.get(&category).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip() {
        assert_eq!(Category::from_label("Find a recipe"), Some(Category::RecipeSearch));
        assert_eq!(Category::from_label("Choose a wine"), Some(Category::WinePairing));
        assert_eq!(Category::from_label("make me a sandwich"), None);
    }

    #[test]
    fn test_full_recipe_cycle_returns_to_menu() {
        let mut session = Session::new();

        let action = session.advance("Find a recipe");
        match action {
            Action::Prompt(text) => {
                assert!(text.contains("find a recipe"));
                assert!(text.contains("list of ingredients"));
            }
            other => panic!("expected Prompt, got {:?}", other),
        }

        let action = session.advance("egg,flour");
        assert_eq!(
            action,
            Action::Lookup {
                category: Category::RecipeSearch,
                query: "egg,flour".to_string(),
            }
        );
        assert_eq!(session.state, State::ChoosingCategory);
        assert_eq!(session.answer(Category::RecipeSearch), Some("egg,flour"));

        // Menu is live again: the other category can be picked right away.
        let action = session.advance("Choose a wine");
        assert!(matches!(action, Action::Prompt(_)));
        let action = session.advance("steak");
        assert_eq!(
            action,
            Action::Lookup {
                category: Category::WinePairing,
                query: "steak".to_string(),
            }
        );
    }

    #[test]
    fn test_wine_prompt_text() {
        let mut session = Session::new();
        match session.advance("Choose a wine") {
            Action::Prompt(text) => {
                assert!(text.contains("choose a wine"));
                assert!(text.contains("recommend you a wine"));
            }
            other => panic!("expected Prompt, got {:?}", other),
        }
    }

    #[test]
    fn test_unrecognized_input_while_choosing_is_ignored() {
        let mut session = Session::new();
        assert_eq!(session.advance("hello there"), Action::Ignore);
        assert_eq!(session.state, State::ChoosingCategory);
        assert!(session.answers.is_empty());
    }

    #[test]
    fn test_done_from_initial_state_ends() {
        let mut session = Session::new();
        assert_eq!(session.advance("Done"), Action::End);
        assert!(session.answers.is_empty());
    }

    #[test]
    fn test_done_while_awaiting_input_clears_session() {
        let mut session = Session::new();
        session.advance("Find a recipe");
        session.advance("egg");
        session.advance("Choose a wine");
        assert_eq!(session.state, State::AwaitingInput(Category::WinePairing));

        assert_eq!(session.advance("Done"), Action::End);
        assert_eq!(session.state, State::ChoosingCategory);
        assert!(session.answers.is_empty());
    }

    #[test]
    fn test_done_is_not_treated_as_a_query() {
        let mut session = Session::new();
        session.advance("Find a recipe");
        // "Done" wins over the pending free-text state.
        assert_eq!(session.advance("Done"), Action::End);
        assert!(session.answer(Category::RecipeSearch).is_none());
    }

    #[test]
    fn test_answer_is_overwritten_on_repeat_search() {
        let mut session = Session::new();
        session.advance("Find a recipe");
        session.advance("egg");
        session.advance("Find a recipe");
        session.advance("milk,butter");
        assert_eq!(session.answer(Category::RecipeSearch), Some("milk,butter"));
    }
}
