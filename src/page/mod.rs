//! Page model
//!
//! The widget lives on a page with four fixed parts: the search form, the
//! show results container, and the episode area with its episode list.
//! Renderers and controllers receive these parts explicitly instead of
//! looking them up globally.

mod dom;

pub use dom::{Element, Node, NodePath};

/// Id of the search form.
pub const SEARCH_FORM_ID: &str = "searchForm";
/// Id of the search term input inside the form.
pub const SEARCH_TERM_ID: &str = "searchForm-term";
/// Id of the show results container.
pub const SHOWS_LIST_ID: &str = "showsList";
/// Id of the episode area (hidden until episodes are shown).
pub const EPISODES_AREA_ID: &str = "episodesArea";
/// Id of the episode list inside the episode area.
pub const EPISODES_LIST_ID: &str = "episodesList";

/// The widget's page.
///
/// The episode list is kept apart from the episode area so both can be
/// borrowed at once; it is mounted as the area's last child when the page is
/// serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub search_form: Element,
    pub shows_list: Element,
    pub episodes_area: Element,
    pub episodes_list: Element,
}

impl Page {
    pub fn new() -> Self {
        let search_form = Element::new("form")
            .with_id(SEARCH_FORM_ID)
            .with_child(
                Element::new("input")
                    .with_id(SEARCH_TERM_ID)
                    .with_attribute("type", "text")
                    .with_attribute("placeholder", "Show title")
                    .with_attribute("value", ""),
            )
            .with_child(
                Element::new("button")
                    .with_attribute("type", "submit")
                    .with_text("Go!"),
            );

        let shows_list = Element::new("div").with_id(SHOWS_LIST_ID).with_class("row");

        let episodes_area = Element::new("section")
            .with_id(EPISODES_AREA_ID)
            .with_child(Element::new("h2").with_text("Episodes"))
            .hidden();

        let episodes_list = Element::new("ul").with_id(EPISODES_LIST_ID);

        Self {
            search_form,
            shows_list,
            episodes_area,
            episodes_list,
        }
    }

    /// Current value of the search term input.
    pub fn search_term(&self) -> String {
        self.search_form
            .find_by_id(SEARCH_TERM_ID)
            .and_then(|input| input.attribute("value"))
            .unwrap_or_default()
            .to_string()
    }

    /// Types `term` into the search term input.
    pub fn set_search_term(&mut self, term: &str) {
        if let Some(input) = self.search_form.find_by_id_mut(SEARCH_TERM_ID) {
            input.set_attribute("value", term);
        }
    }

    /// Serializes the whole page to HTML.
    pub fn to_html(&self) -> String {
        let mut episodes_area = self.episodes_area.clone();
        episodes_area.append(self.episodes_list.clone());

        [
            self.search_form.to_html(),
            self.shows_list.to_html(),
            episodes_area.to_html(),
        ]
        .join("\n")
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
