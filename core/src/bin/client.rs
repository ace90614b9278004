use calorieburn_core::client::{validate_input, PredictClient, DEFAULT_API_URL};
use calorieburn_core::equivalents::{BurnEquivalents, Effort};
use calorieburn_core::{PredictResponse, SessionFeatures};
use clap::Parser;

/// Spør prediksjonstjenesten og viser resultatet.
#[derive(Parser, Debug)]
#[command(name = "calorie-client", version, about = "Ask the calorie API how much a workout burns")]
struct Args {
    #[arg(long, default_value = DEFAULT_API_URL)]
    url: String,

    #[arg(long, default_value = "male", value_parser = ["male", "female"])]
    gender: String,

    #[arg(long, default_value_t = 30)]
    age: i64,

    /// cm
    #[arg(long, default_value_t = 170.0)]
    height: f64,

    /// kg
    #[arg(long, default_value_t = 70.0)]
    weight: f64,

    /// minutter
    #[arg(long, default_value_t = 30.0)]
    duration: f64,

    /// bpm
    #[arg(long, default_value_t = 120.0)]
    heart_rate: f64,

    /// °C
    #[arg(long, default_value_t = 36.8)]
    body_temp: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let features = SessionFeatures {
        gender: args.gender,
        age: args.age,
        height: args.height,
        weight: args.weight,
        duration: args.duration,
        heart_rate: args.heart_rate,
        body_temp: args.body_temp,
    };
    validate_input(&features)?;

    let client = PredictClient::new(args.url);
    match client.predict(&features) {
        Ok(PredictResponse::Prediction { prediction }) => report(prediction),
        Ok(PredictResponse::Error { error }) => println!("Error in prediction: {error}"),
        // HttpStatus/Transport har allerede "Error:"/"Exception:" i meldingen
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn report(kcal: i64) {
    let eq = BurnEquivalents::from_kcal(kcal);
    println!("🔥 You will burn approximately {kcal} Calories");
    println!("That's approximately {:.2} kg of fat burned!", eq.fat_kg);
    println!("{}", Effort::from_kcal(kcal).message());
    println!("--- Your Burn Equivalents ---");
    println!("Cans of Cola:   {:.1}", eq.cola_cans);
    println!("Pizza Slices:   {:.1}", eq.pizza_slices);
    println!("Chocolate Bars: {:.1}", eq.chocolate_bars);
}
