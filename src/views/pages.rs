use crate::models::{Item, List};
use askama::Template;

/// What the item input box shows: the last submitted value and an optional error
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub value: String,
    pub error: Option<String>,
}

impl FormState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_error(value: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            error: Some(error.into()),
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or_default()
    }
}

/// Entry page with a form that starts a new list
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub form: FormState,
}

/// Page of one list: its items in order, then a form to add another
#[derive(Template)]
#[template(path = "lists/view.html")]
pub struct ListPage {
    pub list_id: i64,
    pub items: Vec<Item>,
    pub form: FormState,
}

impl ListPage {
    pub fn new(list: &List, items: Vec<Item>, form: FormState) -> Self {
        Self { list_id: list.id, items, form }
    }
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage;

#[derive(Template)]
#[template(path = "server_error.html")]
pub struct ServerErrorPage;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_page_has_an_empty_form_posting_to_new_list() {
        let html = HomePage { form: FormState::empty() }.render().unwrap();
        assert!(html.contains("action=\"/lists/new\""));
        assert!(html.contains("id=\"id_new_item\""));
        assert!(html.contains("value=\"\""));
        assert!(!html.contains("has-error"));
    }

    #[test]
    fn error_and_submitted_value_are_escaped() {
        let form = FormState::with_error("<script>", "You can't have an empty list item");
        let html = HomePage { form }.render().unwrap();
        assert!(html.contains("value=\"&lt;script&gt;\""));
        assert!(html.contains("You can&#x27;t have an empty list item"));
    }

    #[test]
    fn list_page_numbers_items_in_order() {
        let list = List { id: 3 };
        let items = vec![
            Item { id: 10, text: "Buy peacock feathers".to_string(), list_id: 3 },
            Item { id: 11, text: "Make a fly".to_string(), list_id: 3 },
        ];
        let html = ListPage::new(&list, items, FormState::empty()).render().unwrap();

        let first = html.find("1: Buy peacock feathers").unwrap();
        let second = html.find("2: Make a fly").unwrap();
        assert!(first < second);
        assert!(html.contains("action=\"/lists/3/\""));
    }

    #[test]
    fn item_text_is_escaped_in_the_table() {
        let list = List { id: 1 };
        let items = vec![Item { id: 1, text: "<b>bold</b>".to_string(), list_id: 1 }];
        let html = ListPage::new(&list, items, FormState::empty()).render().unwrap();
        assert!(html.contains("1: &lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn error_pages_render() {
        assert!(NotFoundPage.render().unwrap().contains("Not found"));
        assert!(ServerErrorPage.render().unwrap().contains("Something went wrong"));
    }
}
