pub mod confirm;
pub mod exchange_forms;
pub mod exchange_table;
pub mod form;
pub mod header;
pub mod membership;
pub mod stock_forms;
pub mod stock_table;
pub mod table;
pub mod toast;
