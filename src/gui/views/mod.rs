pub mod all_words;
pub mod history;
pub mod home;
pub mod reading;
pub mod tutorial;

pub use all_words::AllWordsView;
pub use home::HomeView;
pub use reading::ReadingView;
