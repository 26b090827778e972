//! Natural-language instructions sent to the remote models.

use super::types::{RefinementRequest, SynthesisRequest};

/// Rules appended to every synthesis directive.
pub const PRODUCTION_RULES: [&str; 4] = [
    "Respectez strictement l'accent et l'intonation de la langue choisie.",
    "Incarnez la personnalité du profil vocal sélectionné.",
    "Appliquez les modulations de vitesse, profondeur, ton et style de narration demandées.",
    "Aucun texte étranger ne doit être ajouté.",
];

pub fn refinement_prompt(request: &RefinementRequest) -> String {
    format!(
        "Vous êtes l'ingénieur du son principal de \"NOUR VOICE - Professional Voice Engine\".\n\
         Votre tâche est de raffiner le texte suivant pour une production vocale professionnelle.\n\
         \n\
         Paramètres :\n\
         1. Langue/Style : {dialect}.\n\
         2. Domaine : {domain}.\n\
         3. Personnalité : {persona}.\n\
         4. Consignes : Optimisez la ponctuation, le rythme et le ton pour un rendu naturel. \
         Style de narration souhaité : {narration}.\n\
         \n\
         Texte à traiter :\n\
         \"{text}\"\n\
         \n\
         Retournez uniquement le texte optimisé, sans commentaires.",
        dialect = request.dialect,
        domain = request.domain,
        persona = request.persona_name,
        narration = request.narration_style,
        text = request.text,
    )
}

pub fn studio_directive(request: &SynthesisRequest) -> String {
    let rules: String = PRODUCTION_RULES
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("{}. {rule}\n", i + 1))
        .collect();

    format!(
        "Directives NOUR VOICE :\n\
         Générez une performance vocale de haute qualité basée sur ces spécifications :\n\
         \n\
         {note}\n\
         \n\
         Règles de production :\n\
         {rules}\
         \n\
         Texte à enregistrer :\n\
         \"{text}\"",
        note = request.performance_note.trim(),
        text = request.text,
    )
}
