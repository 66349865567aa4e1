//! Slice falling fruit with your hands, drawn as pixels in the terminal.
//!
//! A [`pose::PoseSource`] reports where the player's hands are each frame.
//! Each hand leaves a short knife trail; [`session::Session::step`] runs the
//! trails against the fruit, scores cuts, punishes misses and bombs, and
//! moves the game between its intro, rounds, cooldowns and losses.
//! [`render::draw`] paints the result into a [`pixel::PixelBuf`].

pub mod collision;
pub mod config;
pub mod font;
pub mod fruit;
pub mod geom;
pub mod pixel;
pub mod pose;
pub mod render;
pub mod session;
pub mod sound;
pub mod spawner;
pub mod sprite;
pub mod trail;
