use image::RgbaImage;

/// Title used when the input has none.
pub const UNTITLED: &str = "Untitled";

/// Carousel content: one title page followed by numbered points.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CarouselInput {
    /// A missing or `null` title becomes [`UNTITLED`].
    #[serde(default = "untitled", deserialize_with = "title_or_untitled")]
    pub title: String,
    /// A missing or `null` list is empty.
    #[serde(default, alias = "notes", deserialize_with = "null_as_default")]
    pub points: Vec<String>,
}

fn untitled() -> String {
    UNTITLED.to_owned()
}

fn title_or_untitled<'de, D: serde::Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    let title: Option<String> = serde::Deserialize::deserialize(de)?;
    Ok(title.unwrap_or_else(untitled))
}

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    let value: Option<T> = serde::Deserialize::deserialize(de)?;
    Ok(value.unwrap_or_default())
}

impl CarouselInput {
    pub fn new(title: impl Into<String>, points: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            title: title.into(),
            points: points.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_json_str(text: &str) -> crate::CarouselResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| crate::CarouselError::serde(format!("carousel input json: {e}")))
    }

    /// Title to draw: the given one, or [`UNTITLED`] when it is blank.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }
}

/// One output page; index 0 is the title page.
#[derive(Clone, Debug)]
pub struct RenderedPage {
    pub index: usize,
    pub pixels: RgbaImage,
}

impl RenderedPage {
    /// `page_01.png` for the title page, then `page_02.png`, ...
    pub fn file_name(&self) -> String {
        format!("page_{:02}.png", self.index + 1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/model.rs"]
mod tests;
