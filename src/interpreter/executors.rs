mod instruction;
mod main;
