/// An image drawn from the asset named `key`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub key: String,
    pub width: f32,
    pub height: f32,
}

impl Image {
    pub fn new(key: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            key: key.into(),
            width,
            height,
        }
    }
}

/// A single line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    content: String,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_text(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn size(&self) -> (f32, f32) {
        (self.content.chars().count() as f32, 1.0)
    }
}
