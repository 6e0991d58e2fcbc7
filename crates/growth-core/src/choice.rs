use crate::answer::AnswerValue;

const PLAIN_SUFFIX: &str = ".jpg";
const HOVER_SUFFIX: &str = "-hover.jpg";

/// Hover variant of an image URL (`a.jpg` -> `a-hover.jpg`).
pub fn hover_asset(src: &str) -> String {
    if src.contains(HOVER_SUFFIX) {
        return src.to_string();
    }
    src.replacen(PLAIN_SUFFIX, HOVER_SUFFIX, 1)
}

/// Non-hover variant of an image URL.
pub fn plain_asset(src: &str) -> String {
    src.replacen(HOVER_SUFFIX, PLAIN_SUFFIX, 1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub id: String,
    /// Current image URL, `None` for text buttons.
    pub image: Option<String>,
    pub selected: bool,
}

impl Choice {
    pub fn button(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image: None,
            selected: false,
        }
    }

    pub fn image(id: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image: Some(src.into()),
            selected: false,
        }
    }
}

/// An image whose `src` must be replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverChange {
    pub id: String,
    pub src: String,
}

/// Result of clicking a choice.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub selected: String,
    pub deselected: Vec<String>,
    /// Image assets reset to their plain variant.
    pub restored: Vec<HoverChange>,
    pub answer: AnswerValue,
}

/// Sibling answer choices of one question.
#[derive(Debug, Clone, Default)]
pub struct ChoiceGroup {
    choices: Vec<Choice>,
}

impl ChoiceGroup {
    pub fn new(choices: Vec<Choice>) -> Self {
        Self { choices }
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn selected(&self) -> Option<&Choice> {
        self.choices.iter().find(|c| c.selected)
    }

    pub fn get(&self, id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == id)
    }

    pub fn pointer_enter(&mut self, id: &str) -> Option<HoverChange> {
        self.swap_asset(id, hover_asset)
    }

    pub fn pointer_leave(&mut self, id: &str) -> Option<HoverChange> {
        self.swap_asset(id, plain_asset)
    }

    fn swap_asset(&mut self, id: &str, swap: fn(&str) -> String) -> Option<HoverChange> {
        let choice = self.choices.iter_mut().find(|c| c.id == id)?;
        if choice.selected {
            return None;
        }
        let src = choice.image.as_mut()?;
        let next = swap(src);
        if next == *src {
            return None;
        }
        *src = next.clone();
        Some(HoverChange {
            id: choice.id.clone(),
            src: next,
        })
    }

    /// Marks `id` selected and clears its siblings. The clicked image keeps
    /// its current asset; deselected images drop back to the plain one.
    pub fn select(&mut self, id: &str) -> Option<Selection> {
        if !self.choices.iter().any(|c| c.id == id) {
            return None;
        }

        let mut deselected = Vec::new();
        let mut restored = Vec::new();
        for choice in self.choices.iter_mut() {
            if choice.id == id {
                choice.selected = true;
                continue;
            }
            if !choice.selected {
                continue;
            }
            choice.selected = false;
            deselected.push(choice.id.clone());
            if let Some(src) = choice.image.as_mut() {
                let plain = plain_asset(src);
                if plain != *src {
                    *src = plain.clone();
                    restored.push(HoverChange {
                        id: choice.id.clone(),
                        src: plain,
                    });
                }
            }
        }

        Some(Selection {
            selected: id.to_string(),
            deselected,
            restored,
            answer: AnswerValue::Choice(id.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images() -> ChoiceGroup {
        ChoiceGroup::new(vec![
            Choice::image("a", "/images/a.jpg"),
            Choice::image("b", "/images/b.jpg"),
            Choice::image("c", "/images/c.jpg"),
        ])
    }

    #[test]
    fn asset_variants() {
        assert_eq!(hover_asset("/img/x.jpg"), "/img/x-hover.jpg");
        assert_eq!(hover_asset("/img/x-hover.jpg"), "/img/x-hover.jpg");
        assert_eq!(plain_asset("/img/x-hover.jpg"), "/img/x.jpg");
        assert_eq!(plain_asset("/img/x.png"), "/img/x.png");
    }

    #[test]
    fn hover_swaps_unselected_images() {
        let mut group = images();
        let change = group.pointer_enter("a").unwrap();
        assert_eq!(change.src, "/images/a-hover.jpg");
        let change = group.pointer_leave("a").unwrap();
        assert_eq!(change.src, "/images/a.jpg");
        assert!(group.pointer_leave("a").is_none());
    }

    #[test]
    fn selecting_b_after_a_leaves_only_b() {
        let mut group = images();

        group.pointer_enter("a");
        let first = group.select("a").unwrap();
        assert!(first.deselected.is_empty());
        assert_eq!(group.get("a").unwrap().image.as_deref(), Some("/images/a-hover.jpg"));

        group.pointer_enter("b");
        let second = group.select("b").unwrap();
        assert_eq!(second.deselected, vec!["a".to_string()]);
        assert_eq!(
            second.restored,
            vec![HoverChange {
                id: "a".to_string(),
                src: "/images/a.jpg".to_string()
            }]
        );
        assert_eq!(second.answer, AnswerValue::Choice("b".to_string()));

        let selected: Vec<_> = group.choices().iter().filter(|c| c.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "b");
        assert_eq!(group.get("a").unwrap().image.as_deref(), Some("/images/a.jpg"));
    }

    #[test]
    fn selected_image_is_frozen() {
        let mut group = images();
        group.pointer_enter("c");
        group.select("c");
        assert!(group.pointer_leave("c").is_none());
        assert_eq!(group.get("c").unwrap().image.as_deref(), Some("/images/c-hover.jpg"));
    }

    #[test]
    fn buttons_have_no_assets() {
        let mut group = ChoiceGroup::new(vec![Choice::button("yes"), Choice::button("no")]);
        assert!(group.pointer_enter("yes").is_none());
        let selection = group.select("no").unwrap();
        assert!(selection.restored.is_empty());
        assert_eq!(selection.answer.encode(), "no");
        assert!(group.select("maybe").is_none());
    }
}
