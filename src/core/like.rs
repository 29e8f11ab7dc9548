use serde::Serialize;

pub const LIKE_LABEL: &str = "Like setup";
pub const UNLIKE_LABEL: &str = "Unlike setup";

/// Optimistic like counter for one card. Lives only as long as the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "likes", rename_all = "lowercase")]
pub enum LikeButton {
    Unliked(u32),
    Liked(u32),
}

impl LikeButton {
    pub fn new(initial_likes: u32) -> Self {
        LikeButton::Unliked(initial_likes)
    }

    pub fn toggle(self) -> Self {
        match self {
            LikeButton::Unliked(likes) => LikeButton::Liked(likes.saturating_add(1)),
            LikeButton::Liked(likes) => LikeButton::Unliked(likes.saturating_sub(1)),
        }
    }

    pub fn likes(&self) -> u32 {
        match self {
            LikeButton::Unliked(likes) | LikeButton::Liked(likes) => *likes,
        }
    }

    pub fn is_liked(&self) -> bool {
        matches!(self, LikeButton::Liked(_))
    }

    /// Accessible label describing what a click will do.
    pub fn label(&self) -> &'static str {
        if self.is_liked() {
            UNLIKE_LABEL
        } else {
            LIKE_LABEL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_likes_then_unlikes() {
        let button = LikeButton::new(41);
        assert!(!button.is_liked());
        assert_eq!(button.label(), LIKE_LABEL);

        let liked = button.toggle();
        assert!(liked.is_liked());
        assert_eq!(liked.likes(), 42);
        assert_eq!(liked.label(), UNLIKE_LABEL);

        let unliked = liked.toggle();
        assert!(!unliked.is_liked());
        assert_eq!(unliked.likes(), 41);
        assert_eq!(unliked, button);
    }

    #[test]
    fn test_starting_from_zero() {
        let button = LikeButton::new(0).toggle().toggle();
        assert_eq!(button, LikeButton::Unliked(0));
    }

    #[test]
    fn test_serialized_state() {
        let json = serde_json::to_value(LikeButton::new(5).toggle()).unwrap();
        assert_eq!(json, serde_json::json!({"state": "liked", "likes": 6}));
    }
}
