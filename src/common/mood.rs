use serde::Serialize;

/// UI-selected category driving which subreddits and news categories feed the
/// trending aggregation. Unknown inputs canonicalize to [`Mood::Viral`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Funny,
    Tech,
    Motivational,
    Relatable,
    Viral,
    Entertainment,
    Work,
    Love,
    Sad,
    Happy,
    Angry,
    Cool,
    Mindblown,
    Money,
}

impl Mood {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "funny" => Some(Self::Funny),
            "tech" => Some(Self::Tech),
            "motivational" => Some(Self::Motivational),
            "relatable" => Some(Self::Relatable),
            "viral" => Some(Self::Viral),
            "entertainment" => Some(Self::Entertainment),
            "work" => Some(Self::Work),
            "love" => Some(Self::Love),
            "sad" => Some(Self::Sad),
            "happy" => Some(Self::Happy),
            "angry" => Some(Self::Angry),
            "cool" => Some(Self::Cool),
            "mindblown" => Some(Self::Mindblown),
            "money" => Some(Self::Money),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Funny => "funny",
            Self::Tech => "tech",
            Self::Motivational => "motivational",
            Self::Relatable => "relatable",
            Self::Viral => "viral",
            Self::Entertainment => "entertainment",
            Self::Work => "work",
            Self::Love => "love",
            Self::Sad => "sad",
            Self::Happy => "happy",
            Self::Angry => "angry",
            Self::Cool => "cool",
            Self::Mindblown => "mindblown",
            Self::Money => "money",
        }
    }

    pub fn subreddits(&self) -> &'static [&'static str] {
        match self {
            Self::Funny => &[
                "memes",
                "funny",
                "dankmemes",
                "meirl",
                "PrequelMemes",
                "comedyheaven",
                "okbuddyretard",
            ],
            Self::Tech => &[
                "technology",
                "programming",
                "MachineLearning",
                "gadgets",
                "Android",
            ],
            Self::Motivational => &[
                "GetMotivated",
                "wholesomememes",
                "MadeMeSmile",
                "HumansBeingBros",
            ],
            Self::Relatable => &[
                "meirl",
                "mildlyinfuriating",
                "antiwork",
                "adultlife",
                "twentysomething",
            ],
            Self::Viral => &[
                "memes",
                "dankmemes",
                "funny",
                "technology",
                "worldnews",
                "todayilearned",
            ],
            Self::Entertainment => &["gaming", "movies", "television", "Music", "netflix"],
            Self::Work => &[
                "antiwork",
                "programming",
                "productivity",
                "cscareerquestions",
                "entrepreneur",
            ],
            Self::Love => &[
                "dating",
                "relationship_advice",
                "relationships",
                "dating_advice",
            ],
            Self::Sad => &["depression", "sad", "lonely", "support"],
            Self::Happy => &["happy", "wholesome", "MadeMeSmile", "UpliftingNews"],
            Self::Angry => &["mildlyinfuriating", "rage", "antiwork", "rant"],
            Self::Cool => &["coolguides", "interestingasfuck", "nextfuckinglevel"],
            Self::Mindblown => &[
                "todayilearned",
                "interestingasfuck",
                "science",
                "Damnthatsinteresting",
            ],
            Self::Money => &["investing", "cryptocurrency", "personalfinance", "stocks"],
        }
    }

    /// News category for this mood, or `None` for moods served by Reddit only.
    pub fn news_category(&self) -> Option<&'static str> {
        match self {
            Self::Funny | Self::Love | Self::Sad | Self::Angry | Self::Happy => None,
            Self::Tech => Some("technology"),
            Self::Motivational => Some("business"),
            Self::Relatable => Some("general"),
            Self::Viral => Some("general"),
            Self::Entertainment => Some("entertainment"),
            Self::Work => Some("business"),
            Self::Cool => Some("science"),
            Self::Mindblown => Some("science"),
            Self::Money => Some("business"),
        }
    }

    /// Static backfill topics used when the live sources come up short.
    pub fn fallback_topics(&self) -> &'static [(&'static str, i64)] {
        match self {
            Self::Funny => &[
                ("Funny everyday life situations", 500),
                ("Internet memes and viral content", 480),
                ("Relatable social media moments", 460),
            ],
            Self::Tech => &[
                ("Latest technology innovations", 500),
                ("Programming and development trends", 480),
                ("AI and machine learning updates", 460),
            ],
            Self::Motivational => &[
                ("Success and achievement stories", 500),
                ("Personal growth and improvement", 480),
                ("Overcoming challenges", 460),
            ],
            Self::Relatable => &[
                ("Everyday life struggles", 500),
                ("Work from home experiences", 480),
                ("Adult life realities", 460),
            ],
            Self::Viral => &[
                ("Trending social media content", 500),
                ("Current viral moments", 480),
                ("Internet culture phenomena", 460),
            ],
            Self::Entertainment => &[
                ("Gaming and streaming trends", 500),
                ("Movie and TV show discussions", 480),
                ("Celebrity and pop culture", 460),
            ],
            Self::Work => &[
                ("Career and productivity tips", 500),
                ("Workplace culture and trends", 480),
                ("Professional development", 460),
            ],
            Self::Love => &[
                ("Dating and relationship humor", 500),
                ("Romance and relationship advice", 480),
                ("Love and dating experiences", 460),
            ],
            Self::Sad => &[
                ("Emotional support and understanding", 500),
                ("Coping with difficult times", 480),
                ("Mental health awareness", 460),
            ],
            Self::Happy => &[
                ("Positive and uplifting moments", 500),
                ("Good news and happy stories", 480),
                ("Wholesome and feel-good content", 460),
            ],
            Self::Angry => &[
                ("Everyday frustrations and rants", 500),
                ("Things that mildly infuriate people", 480),
                ("Common annoying experiences", 460),
            ],
            Self::Cool => &[
                ("Interesting facts and cool guides", 500),
                ("Amazing and impressive content", 480),
                ("Cool lifestyle and trends", 460),
            ],
            Self::Mindblown => &[
                ("Surprising facts and discoveries", 500),
                ("Mind-blowing science and nature", 480),
                ("Incredible and fascinating content", 460),
            ],
            Self::Money => &[
                ("Personal finance and investing tips", 500),
                ("Cryptocurrency and trading trends", 480),
                ("Money management and wealth building", 460),
            ],
        }
    }
}
