//! Static station entrance coordinates.
//!
//! The upstream station feed has no entrance data, so the handful of
//! stations we have surveyed carry a hardcoded table. Stations without an
//! entry simply have no entrances attached.

use crate::domain::Coordinate;

/// Look up surveyed entrance coordinates for a station code.
pub fn entrances_for(abbr: &str) -> Option<Vec<Coordinate>> {
    let coords: &[(f64, f64)] = match abbr {
        "12TH" => &[
            (37.804501, -122.271252),
            (37.804238, -122.270772),
            (37.803252, -122.271736),
            (37.803375, -122.271966),
            (37.802357, -122.272301),
            (37.802454, -122.272535),
            (37.803941, -122.271312),
        ],
        "19TH" => &[
            (37.808964, -122.267841),
            (37.808841, -122.268503),
            (37.808427, -122.268512),
            (37.80749, -122.269092),
            (37.806899, -122.269464),
            (37.807358, -122.270033),
        ],
        "EMBR" => &[
            (37.793536, -122.39584),
            (37.793682, -122.396025),
            (37.792788, -122.396789),
            (37.792901, -122.396995),
            (37.792046, -122.397729),
            (37.792184, -122.397928),
        ],
        "MCAR" => &[(37.829356, -122.266669)],
        "MONT" => &[
            (37.789378, -122.401114),
            (37.78919, -122.401759),
            (37.788489, -122.402242),
            (37.790529, -122.400708),
        ],
        "POWL" => &[
            (37.786136, -122.40559),
            (37.786045, -122.405405),
            (37.785439, -122.406469),
            (37.785294, -122.406331),
            (37.78442, -122.407399),
            (37.7845, -122.407643),
            (37.783877, -122.408595),
            (37.783712, -122.408359),
        ],
        _ => return None,
    };

    Some(
        coords
            .iter()
            .map(|&(lat, lng)| Coordinate { lat, lng })
            .collect(),
    )
}
