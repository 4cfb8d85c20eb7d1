//! Canned replies for the /joke and /compliment commands.

use rand::seq::SliceRandom;

pub const JOKES: &[&str] = &[
    "I used to be a photographer, but I kept losing focus.",
    "Why did the photo go to jail? It was framed.",
    "My camera and I are inseparable. We develop together.",
    "I told a joke about pixelation once. Nobody got the full picture.",
    "What do you call a blurry selfie? An out-of-focus group of one.",
    "Photographers are the most negative people — until you develop them.",
    "I tried mirror photography. It was a complete reflection of my skills.",
    "Why don't secrets survive in a darkroom? Too much exposure.",
    "My heatmap photos are a hit. People say they're fire.",
    "ASCII me no questions, I'll tell you no lies.",
];

pub const COMPLIMENTS: &[&str] = &[
    "You have a great eye — every photo you send is a keeper.",
    "Your taste in pictures is impeccable.",
    "You brighten this chat more than any filter could.",
    "Whatever you touch turns out picture-perfect.",
    "You're the highlight of my message queue.",
    "Talking to you is the best part of my runtime.",
    "You make even a pixelated day look sharp.",
    "Your creativity deserves a gallery of its own.",
    "You'd look great in any orientation — horizontal or vertical.",
    "If charm were an image, you'd be full resolution.",
];

pub fn random_joke() -> &'static str {
    pick(JOKES)
}

pub fn random_compliment() -> &'static str {
    pick(COMPLIMENTS)
}

fn pick(items: &'static [&'static str]) -> &'static str {
    items.choose(&mut rand::thread_rng()).copied().unwrap_or("")
}
