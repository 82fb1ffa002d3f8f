pub mod char_field;
pub mod choice_field;
pub mod email_field;

pub use char_field::CharField;
pub use choice_field::{Choice, ChoiceField, MultipleChoiceField};
pub use email_field::EmailField;
