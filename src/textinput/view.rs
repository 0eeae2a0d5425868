//! View rendering for the textinput component.

use super::model::Model;

impl Model {
    /// Renders the prompt and the visible part of the value, with the
    /// cursor shown as a reversed cell while focused.
    pub fn view(&self) -> String {
        if self.value.is_empty() && !self.placeholder.is_empty() {
            return self.placeholder_view();
        }

        let end = self.offset_right.min(self.value.len());
        let visible = &self.value[self.offset.min(end)..end];
        let pos = self.pos.saturating_sub(self.offset);

        let mut v = self.prompt_style.render(&self.prompt);
        let before: String = visible.iter().take(pos).collect();
        v.push_str(&self.text_style.render(&before));

        match visible.get(pos) {
            Some(ch) => {
                v.push_str(&self.cursor_view(*ch));
                let after: String = visible.iter().skip(pos + 1).collect();
                v.push_str(&self.text_style.render(&after));
            }
            None => v.push_str(&self.cursor_view(' ')),
        }
        v
    }

    fn placeholder_view(&self) -> String {
        let mut chars = self.placeholder.chars();
        let mut v = self.prompt_style.render(&self.prompt);

        if let Some(first) = chars.next() {
            if self.focus {
                v.push_str(&self.cursor_view(first));
            } else {
                v.push_str(&self.placeholder_style.render(&first.to_string()));
            }
        }
        let rest: String = chars.collect();
        v.push_str(&self.placeholder_style.render(&rest));
        v
    }

    fn cursor_view(&self, ch: char) -> String {
        let s = ch.to_string();
        if self.focus {
            self.cursor_style.clone().inline(true).reverse(true).render(&s)
        } else {
            self.text_style.clone().inline(true).render(&s)
        }
    }
}
