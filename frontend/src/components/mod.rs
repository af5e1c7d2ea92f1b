pub mod confirm_modal;
pub mod filter_bar;
pub mod header;
pub mod resource_form;
pub mod resource_table;
pub mod toast;
