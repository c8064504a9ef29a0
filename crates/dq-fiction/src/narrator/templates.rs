//! Narration templates, several variants per cue.

use super::{Cue, Narration};

#[cfg(test)]
pub(super) const ALL_CUES: [Cue; 16] = [
    Cue::Move,
    Cue::Attack,
    Cue::Take,
    Cue::Use,
    Cue::Equip,
    Cue::Unequip,
    Cue::Drop,
    Cue::Flee,
    Cue::Solve,
    Cue::Unlock,
    Cue::Look,
    Cue::Dodge,
    Cue::Block,
    Cue::Critical,
    Cue::Death,
    Cue::Victory,
];

/// Template variants for a cue.
pub(super) fn variants(cue: Cue) -> &'static [&'static str] {
    match cue {
        Cue::Move => &[
            "The corridor swallowed their footsteps as they headed {direction}.",
            "Torch held high, the adventurer pressed on {direction}.",
            "They set off {direction}, ears straining for any sound.",
            "Dust stirred underfoot as they made their way {direction}.",
        ],
        Cue::Attack => &[
            "They lunged at the {enemy} without hesitation!",
            "A battle cry echoed off the stones as they struck the {enemy}!",
            "Blade flashing, the adventurer went for the {enemy}!",
            "They darted in and swung hard at the {enemy}!",
        ],
        Cue::Take => &[
            "They tucked the {item} away for later.",
            "The {item} changed hands with a quiet clink.",
            "A useful find: the {item} went into their pack.",
            "They scooped up the {item} before moving on.",
        ],
        Cue::Use => &[
            "They put the {item} to work without a second thought.",
            "The {item} did exactly what it promised.",
            "A moment's pause, and the {item} was spent.",
            "They reached for the {item} just in time.",
        ],
        Cue::Equip => &[
            "The {item} settled into place as if made for them.",
            "With the {item} ready, they felt a little braver.",
            "They tested the weight of the {item} and nodded.",
            "Now outfitted with the {item}, they squared their shoulders.",
        ],
        Cue::Unequip => &[
            "They set the {item} aside and stowed it in their pack.",
            "The {item} came off with a tug of a strap.",
            "For now, the {item} would ride in the pack.",
            "They loosened the {item} and put it away.",
        ],
        Cue::Drop => &[
            "The {item} hit the floor with a dull thud.",
            "They left the {item} behind without regret.",
            "Lighter now, they walked away from the {item}.",
            "The {item} was abandoned to the dust.",
        ],
        Cue::Flee => &[
            "They turned and ran, heart pounding.",
            "Discretion won out, and they bolted for the nearest exit.",
            "A quick retreat kept them breathing for another round.",
            "They slipped away while their foe was still swinging.",
        ],
        Cue::Solve => &[
            "They studied the {puzzle} and gave their answer.",
            "Brow furrowed, they turned the {puzzle} over in their mind.",
            "The {puzzle} waited in silence for their reply.",
            "They took a breath and faced the {puzzle}.",
        ],
        Cue::Unlock => &[
            "The lock to the {direction} gave way with a heavy clunk.",
            "Hinges groaned as the way {direction} swung open.",
            "The key turned, and the path {direction} was clear.",
            "With a click, the door {direction} yielded.",
        ],
        Cue::Look => &[
            "They let their eyes adjust to the gloom.",
            "They took in every shadow and corner.",
            "A careful glance around revealed the lay of the land.",
            "They paused to get their bearings.",
        ],
        Cue::Dodge => &[
            "The {enemy} swung at empty air as they twisted aside!",
            "A quick sidestep left the {enemy} off balance!",
            "They ducked under the {enemy}'s blow just in time!",
            "The {enemy}'s attack whistled past harmlessly!",
        ],
        Cue::Block => &[
            "They caught the {enemy}'s strike and held firm!",
            "The {enemy}'s blow glanced off their guard!",
            "Bracing hard, they absorbed the worst of the {enemy}'s attack!",
            "A well-timed parry blunted the {enemy}'s assault!",
        ],
        Cue::Critical => &[
            "A perfect opening! The {enemy} staggered under the blow!",
            "They found a gap in the {enemy}'s guard and struck true!",
            "The {enemy} reeled from a crushing hit!",
            "That one landed exactly where it hurt the {enemy} most!",
        ],
        Cue::Death => &[
            "The torch guttered out, and so did their story.",
            "The tower keeps its secrets, and now one more adventurer.",
            "Their strength failed at last, far from the light.",
            "So ended the climb, unfinished and unsung.",
        ],
        Cue::Victory => &[
            "The shadows lifted from the tower at last!",
            "With the Dark Lord fallen, the kingdom could breathe again!",
            "Against every odd, they stood victorious in the throne room!",
            "Bards would sing of this day for a long time to come!",
        ],
    }
}

/// Replace each placeholder that has a value in `context`.
pub(super) fn fill(template: &str, context: &Narration) -> String {
    let mut text = template.to_string();
    let pairs = [
        ("{enemy}", &context.enemy),
        ("{item}", &context.item),
        ("{direction}", &context.direction),
        ("{puzzle}", &context.puzzle),
    ];
    for (placeholder, value) in pairs {
        if let Some(value) = value {
            text = text.replace(placeholder, value);
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_leaves_missing_placeholders() {
        let text = fill("{item} and {enemy}", &Narration::new().item("Key"));
        assert_eq!(text, "Key and {enemy}");
    }

    #[test]
    fn every_cue_has_variants() {
        for cue in ALL_CUES {
            assert!(variants(cue).len() >= 4, "{cue:?}");
        }
    }
}
