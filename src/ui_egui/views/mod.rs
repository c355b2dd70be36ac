pub mod table_grid;
