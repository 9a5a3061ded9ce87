//! The fixed Amsterdam walking tour the server seeds at first start.
//!
//! Eight stops from NEMO to the Jordaan, plus the walking paths between
//! them. Seeded once and immutable thereafter; also a convenient realistic
//! fixture for demos and tests.

use crate::models::{GeoPoint, RoutePath, TourStop};

#[allow(clippy::too_many_arguments)]
fn stop(
    id: i64,
    order_number: i32,
    title: &str,
    subtitle: &str,
    description: &str,
    kids_content: &str,
    latitude: f64,
    longitude: f64,
    duration: &str,
    next_stop_walking_time: &str,
    walking_tip: &str,
    images: &[&str],
) -> TourStop {
    TourStop {
        id,
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        description: description.to_string(),
        kids_content: Some(kids_content.to_string()),
        order_number,
        latitude,
        longitude,
        audio_url: Some(format!("/media/audio/stop{}.mp3", order_number)),
        duration: Some(duration.to_string()),
        next_stop_walking_time: (!next_stop_walking_time.is_empty())
            .then(|| next_stop_walking_time.to_string()),
        walking_tip: Some(walking_tip.to_string()),
        images: images.iter().map(|name| format!("/media/images/{}", name)).collect(),
    }
}

/// The eight seed stops, NEMO to Jordaan, ordinals 1 through 8.
pub fn seed_stops() -> Vec<TourStop> {
    vec![
        stop(
            1,
            1,
            "NEMO Science Museum",
            "Starting point - The distinctive green hull-shaped museum",
            "We begin at NEMO, the large green building shaped like a ship's hull \
             rising from the water, designed by Renzo Piano and opened in 1997. \
             Its roof doubles as a public square with a panoramic view of the old \
             city center.",
            "Inside NEMO are five floors of hands-on science exhibits where kids \
             and adults can experiment and play.",
            52.374,
            4.9126,
            "10 minutes",
            "5-7 minutes",
            "From NEMO, walk west along the pedestrian bridge and follow the \
             waterfront path towards the small canal, keeping the water on your \
             right.",
            &["nemo1.jpg", "nemo2.jpg"],
        ),
        stop(
            2,
            2,
            "Montelbaanstoren",
            "Medieval Tower - The old brick tower with a white steeple",
            "A picturesque 16th-century tower on the Oudeschans, built around \
             1512 as part of the medieval city wall; the cream-colored clock \
             tower was added in 1606.",
            "The tower's nickname is 'Malle Jaap' - Silly Jack - because its new \
             bells chimed at odd hours or not at all, confusing everyone.",
            52.3725,
            4.9065,
            "5 minutes",
            "5-7 minutes",
            "Cross the bridge next to the tower and continue west down Sint \
             Antoniesbreestraat until you reach an open square with a castle-like \
             building in the middle.",
            &["montelbaanstoren1.jpg", "montelbaanstoren2.jpg"],
        ),
        stop(
            3,
            3,
            "Nieuwmarkt & Lunch at In de Waag",
            "Historic Market Square - The medieval Waag building",
            "Markets have been held on this square since the 17th century. The \
             Waag at its center was built in 1488 as a city gate and later became \
             a weigh house; it is the oldest non-religious building in Amsterdam.",
            "This old building used to be a city gate. Later, goods like cheese \
             and butter were weighed here to make sure no one was cheating!",
            52.3725,
            4.9003,
            "45 minutes (including lunch)",
            "5 minutes",
            "From the Waag, walk north across the square and take Zeedijk towards \
             the large Chinese-style gateway in the distance.",
            &["nieuwmarkt1.jpg", "waag1.jpg"],
        ),
        stop(
            4,
            4,
            "Zeedijk and Fo Guang Shan He Hua Temple",
            "Chinatown - The largest Buddhist temple in Europe",
            "Zeedijk, the old sea dike, is the heart of Amsterdam's Chinatown. \
             The He Hua Temple, inaugurated in 2000, is the largest Buddhist \
             temple in Europe built in traditional Chinese style.",
            "Two stone lions guard the temple entrance. Can you spot the dragons \
             and phoenixes carved on the roof?",
            52.3739,
            4.9012,
            "10 minutes",
            "10 minutes",
            "Continue along Zeedijk as it curves out of Chinatown and follow \
             signs towards Dam Square, heading southwest.",
            &["zeedijk1.jpg", "hehua1.jpg"],
        ),
        stop(
            5,
            5,
            "Dam Square",
            "City Center & Royal Palace - The heart of Amsterdam",
            "The city began here as a dam on the Amstel in the 13th century. \
             Around the square stand the Royal Palace, the Nieuwe Kerk, and the \
             National Monument honoring the victims of World War II.",
            "This big square is where Amsterdam started - it used to be a real \
             dam holding back the river. Can you find the big white pillar \
             monument?",
            52.3731,
            4.8936,
            "15 minutes",
            "10 minutes",
            "Head southwest along Kalverstraat until you see a small arched \
             gateway on your right - the easy-to-miss entrance to Begijnhof.",
            &["damsquare1.jpg", "royalpalace1.jpg"],
        ),
        stop(
            6,
            6,
            "Begijnhof",
            "Secret Courtyard of the Beguines - A hidden medieval sanctuary",
            "A quiet 14th-century courtyard built for the Beguines, a Catholic \
             sisterhood who lived like nuns without formal vows. The oldest \
             wooden house in Amsterdam, from around 1465, still stands on the \
             west side.",
            "We're entering a secret garden hidden in the middle of the city! \
             Can you spot the oldest wooden house in Amsterdam? It's over 550 \
             years old.",
            52.3695,
            4.8892,
            "15 minutes",
            "15 minutes",
            "Exit the way you entered and head west, crossing the Singel canal \
             towards the Canal Belt and the Nine Streets.",
            &["begijnhof1.jpg", "begijnhof2.jpg"],
        ),
        stop(
            7,
            7,
            "The Canal Belt & The Nine Streets",
            "Grachtengordel - The iconic canal system and boutique shopping area",
            "The ring of canals dug in the 17th century gives the city its \
             half-moon shape and a UNESCO World Heritage listing. The Nine \
             Streets cross the canals in a grid of boutiques and cafes.",
            "The houses are tall and skinny because people paid taxes based on \
             how wide their house was along the canal!",
            52.3693,
            4.8856,
            "30 minutes",
            "10 minutes",
            "Continue west to the Prinsengracht and follow it north until you \
             see a church tower with a blue crown - the Westerkerk.",
            &["canals1.jpg", "9streets1.jpg"],
        ),
        stop(
            8,
            8,
            "Jordaan District - Westerkerk and Anne Frank House",
            "Charming neighborhood - The artistic heart of Amsterdam",
            "Our final stop: a 17th-century working-class quarter turned \
             artistic district, home to the Westerkerk's 85-meter tower and the \
             Anne Frank House on the Prinsengracht.",
            "See the tall church tower with the blue crown? That's the \
             Westerkerk, and it plays beautiful bell music. The Jordaan hides \
             secret gardens called 'hofjes' between its buildings.",
            52.3745,
            4.8825,
            "End of tour - explore as long as you wish",
            "",
            "Take your time exploring the winding streets; the Jordaan is \
             perfect for leisurely wandering.",
            &["westerkerk1.jpg", "jordaan1.jpg", "annefrank1.jpg"],
        ),
    ]
}

/// The seven walking paths between consecutive seed stops.
pub fn seed_route_paths() -> Vec<RoutePath> {
    let waypoints: [(i64, i64, [(f64, f64); 3]); 7] = [
        (1, 2, [(52.374, 4.9126), (52.3735, 4.9105), (52.3725, 4.9065)]),
        (2, 3, [(52.3725, 4.9065), (52.3728, 4.9040), (52.3725, 4.9003)]),
        (3, 4, [(52.3725, 4.9003), (52.3732, 4.9008), (52.3739, 4.9012)]),
        (4, 5, [(52.3739, 4.9012), (52.3735, 4.8974), (52.3731, 4.8936)]),
        (5, 6, [(52.3731, 4.8936), (52.3715, 4.8914), (52.3695, 4.8892)]),
        (6, 7, [(52.3695, 4.8892), (52.3694, 4.8874), (52.3693, 4.8856)]),
        (7, 8, [(52.3693, 4.8856), (52.3719, 4.8840), (52.3745, 4.8825)]),
    ];

    waypoints
        .iter()
        .enumerate()
        .map(|(index, (from, to, coords))| RoutePath {
            id: index as i64 + 1,
            from_stop_id: *from,
            to_stop_id: *to,
            coordinates: coords
                .iter()
                .map(|(lat, lng)| GeoPoint { lat: *lat, lng: *lng })
                .collect(),
        })
        .collect()
}
