pub mod mock;
pub mod uinput;
pub mod usb;
