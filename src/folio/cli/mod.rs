pub(crate) mod print;

pub(crate) use print::{print_entries, print_messages};
