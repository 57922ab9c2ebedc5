//! Print the table definitions.

use shopwise_store::schema::DDL;

#[allow(clippy::print_stdout)]
pub fn print() {
    print!("{DDL}");
}
