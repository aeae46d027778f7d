pub mod cancels;
