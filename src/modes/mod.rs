pub mod tools_page;
