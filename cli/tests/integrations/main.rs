mod check;
mod render;
mod solve;
