pub mod kv_line;
pub mod styled_label;

pub use kv_line::{render_kv_line, render_plain_line};
pub use styled_label::{
    button_spans, checkbox_spans, input_spans_with_placeholder, selector_spans, TextState,
};
