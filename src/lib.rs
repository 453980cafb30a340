// LCD + SD card sketch firmware for an ESP32-C3 board

#![no_std]

pub mod board;
