// Purpose - external interfaces, format conversions

pub mod pcm8;
pub mod plot;
pub mod reader;

pub use pcm8::Unsigned8;
pub use plot::{plot, plot_stream};
pub use reader::{ReaderStream, StreamReader};
