use serde::Serialize;

/// Outfit categories the presentation layer keys its styling on
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutfitKind {
    Rain,
    Snow,
    Hot,
    Cold,
    Mild,
}

/// A clothing recommendation for the current conditions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outfit {
    pub text: String,
    pub kind: OutfitKind,
}

/// Recommends an outfit from temperature and sky condition
///
/// Wet conditions take precedence over temperature
///
/// # Arguments
///
/// * 'temp' - temperature in Celsius
/// * 'condition' - sky condition group as reported by the provider, e.g. "Rain"
pub fn outfit_for(temp: f64, condition: Option<&str>) -> Outfit {
    let cond = condition.unwrap_or("").to_lowercase();

    if cond.contains("rain") || cond.contains("drizzle") || cond.contains("thunder") {
        return Outfit { text: "Waterproof jacket & boots ☔".to_string(), kind: OutfitKind::Rain };
    }
    if cond.contains("snow") {
        return Outfit { text: "Warm coat, scarf & gloves 🧤".to_string(), kind: OutfitKind::Snow };
    }
    if temp >= 30.0 {
        return Outfit { text: "T-shirt & shorts 😎".to_string(), kind: OutfitKind::Hot };
    }
    if temp <= 10.0 {
        return Outfit { text: "Heavy coat & scarf 🧣".to_string(), kind: OutfitKind::Cold };
    }

    Outfit { text: "Light sweater & jeans 👕".to_string(), kind: OutfitKind::Mild }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wet_conditions() {
        assert_eq!(outfit_for(15.0, Some("Rain")).kind, OutfitKind::Rain);
        assert_eq!(outfit_for(15.0, Some("Drizzle")).kind, OutfitKind::Rain);
        assert_eq!(outfit_for(15.0, Some("Thunderstorm")).kind, OutfitKind::Rain);
        assert_eq!(outfit_for(-2.0, Some("Snow")).kind, OutfitKind::Snow);
    }

    #[test]
    fn test_temperature_bands() {
        assert_eq!(outfit_for(30.0, Some("Clear")).kind, OutfitKind::Hot);
        assert_eq!(outfit_for(10.0, Some("Clear")).kind, OutfitKind::Cold);
        assert_eq!(outfit_for(20.0, Some("Clear")).kind, OutfitKind::Mild);
        assert_eq!(outfit_for(20.0, None).kind, OutfitKind::Mild);
    }

    #[test]
    fn test_condition_wins_over_temperature() {
        assert_eq!(outfit_for(35.0, Some("Rain")).kind, OutfitKind::Rain);
        assert_eq!(outfit_for(5.0, Some("Thunderstorm")).kind, OutfitKind::Rain);
    }
}
