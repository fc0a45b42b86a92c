mod card_image;

pub use card_image::{fit_to_card, load_card, normalize_card, CardImage, CardOutcome, SkippedCard};
