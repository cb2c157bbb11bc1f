/// Known meme formats. The client may pin one; otherwise selection stays
/// with the text model ("auto").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateCategory {
    Classic,
    Reaction,
    Modern,
    Character,
    Thinking,
    Situational,
    Internet,
}

#[derive(Debug, Clone, Copy)]
pub struct MemeTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub prompt: &'static str,
    pub category: TemplateCategory,
}

use TemplateCategory::*;

pub const TEMPLATES: &[MemeTemplate] = &[
    MemeTemplate { key: "drake", name: "Drake", prompt: "Drake pointing meme format", category: Classic },
    MemeTemplate { key: "distracted", name: "Distracted Boyfriend", prompt: "Distracted boyfriend meme format", category: Classic },
    MemeTemplate { key: "brain", name: "Expanding Brain", prompt: "Expanding brain meme format", category: Classic },
    MemeTemplate { key: "button", name: "Two Buttons", prompt: "Sweating over two buttons meme", category: Classic },
    MemeTemplate { key: "stonks", name: "Stonks", prompt: "Stonks meme format", category: Classic },
    MemeTemplate { key: "woman_yelling", name: "Woman Yelling at Cat", prompt: "Woman yelling at cat meme", category: Classic },
    MemeTemplate { key: "this_is_fine", name: "This is Fine", prompt: "This is fine dog in burning room", category: Classic },
    MemeTemplate { key: "galaxy_brain", name: "Galaxy Brain", prompt: "Galaxy brain meme format", category: Classic },
    MemeTemplate { key: "surprised_pikachu", name: "Surprised Pikachu", prompt: "Surprised Pikachu reaction meme", category: Reaction },
    MemeTemplate { key: "roll_safe", name: "Roll Safe", prompt: "Roll Safe thinking meme format", category: Reaction },
    MemeTemplate { key: "hide_pain_harold", name: "Hide the Pain Harold", prompt: "Hide the Pain Harold stock photo meme", category: Reaction },
    MemeTemplate { key: "grumpy_cat", name: "Grumpy Cat", prompt: "Grumpy Cat disapproval meme", category: Reaction },
    MemeTemplate { key: "success_kid", name: "Success Kid", prompt: "Success Kid fist pump celebration meme", category: Reaction },
    MemeTemplate { key: "awkward_penguin", name: "Awkward Penguin", prompt: "Socially Awkward Penguin meme format", category: Reaction },
    MemeTemplate { key: "is_this_pigeon", name: "Is This a Pigeon?", prompt: "Is this a pigeon butterfly meme format", category: Modern },
    MemeTemplate { key: "change_my_mind", name: "Change My Mind", prompt: "Change my mind debate table meme", category: Modern },
    MemeTemplate { key: "spongebob_mocking", name: "Mocking SpongeBob", prompt: "Mocking SpongeBob alternating caps meme", category: Modern },
    MemeTemplate { key: "distracted_driver", name: "Exit Ramp", prompt: "Car exit ramp choice meme format", category: Modern },
    MemeTemplate { key: "expanding_mind", name: "Expanding Mind", prompt: "Cosmic expanding mind enlightenment meme", category: Modern },
    MemeTemplate { key: "wojak_feel", name: "Wojak Feel", prompt: "Wojak feels guy emotional meme", category: Modern },
    MemeTemplate { key: "bad_luck_brian", name: "Bad Luck Brian", prompt: "Bad Luck Brian unfortunate situations meme", category: Character },
    MemeTemplate { key: "good_guy_greg", name: "Good Guy Greg", prompt: "Good Guy Greg helpful person meme", category: Character },
    MemeTemplate { key: "scumbag_steve", name: "Scumbag Steve", prompt: "Scumbag Steve jerk behavior meme", category: Character },
    MemeTemplate { key: "overly_attached", name: "Overly Attached", prompt: "Overly Attached Girlfriend creepy stare meme", category: Character },
    MemeTemplate { key: "first_world_problems", name: "First World Problems", prompt: "First World Problems privileged complaints meme", category: Character },
    MemeTemplate { key: "philosoraptor", name: "Philosoraptor", prompt: "Philosoraptor deep thinking dinosaur meme", category: Thinking },
    MemeTemplate { key: "ancient_aliens", name: "Ancient Aliens", prompt: "Ancient Aliens guy conspiracy theory meme", category: Thinking },
    MemeTemplate { key: "one_does_not_simply", name: "One Does Not Simply", prompt: "One Does Not Simply Boromir Lord of the Rings meme", category: Thinking },
    MemeTemplate { key: "most_interesting_man", name: "Most Interesting Man", prompt: "Most Interesting Man in the World Dos Equis meme", category: Thinking },
    MemeTemplate { key: "jealous_girlfriend", name: "Side-Eye Chloe", prompt: "Side-eye Chloe judgmental look meme", category: Situational },
    MemeTemplate { key: "disaster_girl", name: "Disaster Girl", prompt: "Disaster Girl smiling at fire meme", category: Situational },
    MemeTemplate { key: "surprised_baby", name: "Surprised Baby", prompt: "Surprised baby shocked expression meme", category: Situational },
    MemeTemplate { key: "pointing_leo", name: "Pointing Leo", prompt: "Leonardo DiCaprio pointing Django meme", category: Situational },
    MemeTemplate { key: "thinking_face", name: "Thinking Face", prompt: "Thinking face emoji contemplation meme", category: Situational },
    MemeTemplate { key: "doge", name: "Doge", prompt: "Doge Shiba Inu wow such meme format", category: Internet },
    MemeTemplate { key: "nyan_cat", name: "Nyan Cat", prompt: "Nyan Cat rainbow trail meme", category: Internet },
    MemeTemplate { key: "trollface", name: "Trollface", prompt: "Trollface problem internet troll meme", category: Internet },
    MemeTemplate { key: "rage_face", name: "Rage Face", prompt: "Rage face angry internet meme", category: Internet },
];

pub fn find(key: &str) -> Option<&'static MemeTemplate> {
    TEMPLATES.iter().find(|template| template.key == key)
}
