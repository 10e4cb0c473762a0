use std::cmp;

use crate::ledger::{format_price, Transaction, TransactionKey};

/// A simple key/value pair for display.
pub struct DetailField {
    pub key: String,
    pub value: String,
}

/// A detail view model: title + fields.
pub struct DetailView {
    pub title: String,
    pub fields: Vec<DetailField>,
}

impl DetailView {
    /// Creates a new detail view with the provided title.
    pub fn new<T: Into<String>>(title: T) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a field to the view, returning self for chaining.
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.add_field(key, value);
        self
    }

    /// Adds a field to the view in-place.
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.fields.push(DetailField {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Render the detail view as a string.
    pub fn render(&self) -> String {
        self.render_lines().join("\n")
    }

    pub fn render_lines(&self) -> Vec<String> {
        let mut body = Vec::new();
        body.push("{".to_string());
        body.extend(self.render_fields());
        body.push("}".to_string());

        let max_line_len = cmp::max(
            self.title.chars().count(),
            body.iter().map(|line| line.chars().count()).max().unwrap_or(0),
        );
        let rule = horizontal_rule(cmp::max(max_line_len, 40));

        let mut lines = Vec::with_capacity(body.len() + 3);
        lines.push(self.title.clone());
        lines.push(rule.clone());
        lines.extend(body);
        lines.push(rule);
        lines
    }

    fn render_fields(&self) -> Vec<String> {
        let max_key_len = self
            .fields
            .iter()
            .map(|field| field.key.len())
            .max()
            .unwrap_or(0);

        self.fields
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let padding = max_key_len.saturating_sub(field.key.len()) + 2;
                let spacer = " ".repeat(padding);
                let suffix = if idx + 1 == self.fields.len() {
                    ""
                } else {
                    ","
                };
                format!("  \"{}\":{}{}{}", field.key, spacer, field.value, suffix)
            })
            .collect()
    }
}

/// Full view of a recorded transaction, fields in build order.
pub fn transaction_view(title: &str, transaction: &Transaction) -> DetailView {
    let mut view = DetailView::new(title);
    for key in TransactionKey::STEPS {
        match key {
            TransactionKey::Items => add_items(&mut view, &transaction.field_values(key.into())),
            _ => view.add_field(key.as_str(), transaction.field_values(key.into()).join(", ")),
        }
    }
    view.add_field("total", format_price(transaction.total()));
    view
}

/// Items are listed one per field, numbered from 0 as in item selection.
pub fn add_items(view: &mut DetailView, formatted_items: &[String]) {
    for (idx, item) in formatted_items.iter().enumerate() {
        view.add_field(format!("item {idx}"), item.clone());
    }
}

fn horizontal_rule(len: usize) -> String {
    "─".repeat(len.max(1))
}
