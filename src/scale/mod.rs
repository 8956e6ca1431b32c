pub mod nearest;
