/// Successive prefixes of `text`, one character longer each step.
///
/// The first item is the empty string (the element is cleared before
/// typing starts) and the last is the full text.
#[derive(Clone, Debug)]
pub struct Typewriter {
    text: String,
    boundaries: Vec<usize>,
    step: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let boundaries = std::iter::once(0)
            .chain(text.char_indices().map(|(index, c)| index + c.len_utf8()))
            .collect();

        Self {
            text,
            boundaries,
            step: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.step >= self.boundaries.len()
    }
}

impl Iterator for Typewriter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let end = *self.boundaries.get(self.step)?;
        self.step += 1;
        Some(self.text[..end].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_one_character_at_a_time() {
        let steps: Vec<_> = Typewriter::new("Smile").collect();

        assert_eq!(steps, vec!["", "S", "Sm", "Smi", "Smil", "Smile"]);
    }

    #[test]
    fn multibyte_characters_are_not_split() {
        let steps: Vec<_> = Typewriter::new("Olá 😀").collect();

        assert_eq!(steps.len(), 6);
        assert_eq!(steps[3], "Olá");
        assert_eq!(steps.last().map(String::as_str), Some("Olá 😀"));
    }

    #[test]
    fn empty_text_only_clears() {
        let mut typewriter = Typewriter::new("");

        assert_eq!(typewriter.next().as_deref(), Some(""));
        assert!(typewriter.is_done());
        assert_eq!(typewriter.next(), None);
    }
}
