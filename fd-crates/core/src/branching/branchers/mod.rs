pub mod independent_variable_value_brancher;
pub mod matrix_brancher;
