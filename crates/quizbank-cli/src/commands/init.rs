//! The `quizbank init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("quizbank.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("assets")?;
    write_if_missing(Path::new("assets/questions.json"), SAMPLE_QUESTIONS)?;
    write_if_missing(Path::new("assets/inventario.csv"), SAMPLE_INVENTORY)?;
    write_if_missing(Path::new("assets/definiciones.json"), SAMPLE_DEFINITIONS)?;

    println!("\nNext steps:");
    println!("  1. Add your questions to assets/questions.json");
    println!("  2. Run: quizbank validate");
    println!("  3. Run: quizbank play --category quiz1");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizbank configuration

assets_dir = "assets"
min_match_score = 10
# seed = 42

[sources]
base = "questions.json"
inventory = "inventario.csv"
# Leave empty to disable an optional source.
supplementary = "questions_extra.json"
definitions = "definiciones.json"

[distractors]
count = 3
"#;

const SAMPLE_QUESTIONS: &str = r#"{
  "quiz1": [
    {
      "question": "¿Qué indica la luz amarilla del semáforo?",
      "options": ["Prevención", "Avanzar rápido", "Pare"],
      "correct": "Prevención"
    },
    {
      "question": "¿Cuál es la velocidad máxima en zona escolar?",
      "options": "30 km/h|50 km/h|60 km/h",
      "correct": "30 km/h"
    }
  ],
  "quiz2": [
    {
      "question": "¿Qué debe hacer ante esta señal?",
      "image": "img/pare.png",
      "imageDesc": "Octágono rojo con la palabra PARE",
      "options": ["Detenerse por completo", "Reducir la velocidad"],
      "correct": "Detenerse por completo"
    },
    {
      "question": "¿Cómo se llama la señal {code}?",
      "catalog": "reglamentarias"
    }
  ],
  "catalogs": {
    "reglamentarias": [
      { "code": "SR-01", "name": "Pare" },
      { "code": "SR-02", "name": "Ceda el paso" },
      { "code": "SR-28", "name": "Prohibido parquear" }
    ]
  }
}
"#;

const SAMPLE_INVENTORY: &str = "nombre_visible,archivo,url
Pare,img\\pare.png,
Ceda el paso,img\\ceda_el_paso.png,
Prohibido parquear,img\\prohibido_parquear.png,
Zona escolar,img\\zona_escolar.png,
Curva peligrosa,img\\curva_peligrosa.png,
";

const SAMPLE_DEFINITIONS: &str = r#"[
  { "term": "Calzada", "definition": "Zona de la vía destinada a la circulación de vehículos." },
  { "term": "Andén", "definition": "Franja de la vía destinada a la circulación de peatones." },
  { "term": "Berma", "definition": "Parte de la estructura de la vía destinada al soporte lateral de la calzada." }
]
"#;
