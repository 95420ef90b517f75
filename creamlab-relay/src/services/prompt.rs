//! Prompt construction for recipe and image generation.

use crate::models::{FlavorLevels, Preference};
use serde_json::json;

/// Persona sent as the system instruction with every recipe request.
pub const SYSTEM_INSTRUCTION: &str = "你是一个温暖的烘焙小助手，专门帮大家用简单的材料做超好吃的奶油。\
你的语气要轻松、鼓励，给出的建议必须是在家就能操作的。";

/// Name of the JSON structure the model is told to produce.
pub const RECIPE_SCHEMA_NAME: &str = "CreamRecipe";

/// Render flavor levels as `甜: 70%, 酸: 40%, ...` in the fixed category order.
pub fn render_flavor_levels(levels: &FlavorLevels) -> String {
    levels
        .iter()
        .map(|(category, level)| format!("{}: {}%", category, level))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the recipe instruction for one set of preferences.
pub fn build_prompt(preference: &Preference) -> String {
    format!(
        "你是一位非常擅长简化烘焙流程、亲切友好的家庭甜点达人。\n\
         你的任务是根据用户现有的简单原材料，设计一款“零失败”且“超好上手”的创意奶油配方。\n\
         \n\
         用户原材料: {ingredients}\n\
         风味偏好: {flavors}\n\
         期望口感: {texture}\n\
         \n\
         输出要求：\n\
         1. 做法必须简单！不需要专业实验室设备，只需要普通的打蛋器、锅具或冰箱。\n\
         2. 材料要平易近人，尽量利用用户提供的材料加上最基础的烘焙基底（如淡奶油、酸奶、奶酪等）。\n\
         3. 步骤清晰，就像在跟朋友说话一样，每一步都给出通俗易懂的指导。\n\
         4. 评分系统 (0-100): 给出甜度、酸度、复杂度、丝滑度、创新度。\n\
         5. 只返回严格的 JSON，不要使用 Markdown 代码块，也不要附加任何解释。\
         JSON 必须符合 {schema} 结构：recipeName (字符串), summary (字符串), \
         ingredients (由 {{\"item\", \"amount\"}} 对象组成的数组), steps (字符串数组), \
         textureTips (字符串), pairingSuggestions (字符串), \
         flavorProfile ({{\"sweetness\", \"acidity\", \"complexity\", \"creaminess\", \"innovation\"}}，均为 0-100 的数字)。",
        ingredients = preference.ingredients,
        flavors = render_flavor_levels(&preference.flavor_levels),
        texture = preference.texture,
        schema = RECIPE_SCHEMA_NAME,
    )
}

/// `responseSchema` constraining the model output to the recipe structure.
pub fn recipe_response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recipeName": { "type": "STRING" },
            "summary": { "type": "STRING" },
            "ingredients": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "item": { "type": "STRING" },
                        "amount": { "type": "STRING" }
                    },
                    "required": ["item", "amount"]
                }
            },
            "steps": { "type": "ARRAY", "items": { "type": "STRING" } },
            "textureTips": { "type": "STRING" },
            "pairingSuggestions": { "type": "STRING" },
            "flavorProfile": {
                "type": "OBJECT",
                "properties": {
                    "sweetness": { "type": "NUMBER" },
                    "acidity": { "type": "NUMBER" },
                    "complexity": { "type": "NUMBER" },
                    "creaminess": { "type": "NUMBER" },
                    "innovation": { "type": "NUMBER" }
                },
                "required": ["sweetness", "acidity", "complexity", "creaminess", "innovation"]
            }
        },
        "required": [
            "recipeName", "summary", "ingredients", "steps",
            "textureTips", "pairingSuggestions", "flavorProfile"
        ]
    })
}

/// Photo prompt for the optional recipe image.
pub fn build_image_prompt(recipe_name: &str) -> String {
    format!(
        "Soft home photography of {}. A beautiful bowl of whipped cream, homemade style, \
         naturally lit from a window, on a wooden kitchen table, simple ceramic bowl, \
         aesthetic and cozy vibes.",
        recipe_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FlavorCategory, FlavorLevel};

    fn preference() -> Preference {
        Preference {
            ingredients: "草莓, 希腊酸奶, 蜂蜜".to_string(),
            flavor_levels: FlavorLevels {
                sweet: FlavorLevel::new(80),
                sour: FlavorLevel::new(35),
                bitter: FlavorLevel::new(0),
                spicy: FlavorLevel::new(5),
                salty: FlavorLevel::new(100),
            },
            texture: "像云朵一样轻盈".to_string(),
        }
    }

    #[test]
    fn test_prompt_embeds_inputs_verbatim() {
        let pref = preference();
        let prompt = build_prompt(&pref);

        assert!(prompt.contains(&pref.ingredients));
        assert!(prompt.contains(&pref.texture));
    }

    #[test]
    fn test_prompt_renders_every_category() {
        let pref = preference();
        let prompt = build_prompt(&pref);

        for category in FlavorCategory::ALL {
            let level = pref.flavor_levels.get(category);
            assert!(
                prompt.contains(&format!("{}: {}%", category, level)),
                "missing {} in prompt",
                category
            );
        }
    }

    #[test]
    fn test_prompt_demands_strict_json() {
        let prompt = build_prompt(&preference());

        assert!(prompt.contains("JSON"));
        assert!(prompt.contains(RECIPE_SCHEMA_NAME));
        for field in ["recipeName", "textureTips", "pairingSuggestions", "flavorProfile"] {
            assert!(prompt.contains(field), "missing {} in prompt", field);
        }
    }

    #[test]
    fn test_render_flavor_levels() {
        assert_eq!(
            render_flavor_levels(&preference().flavor_levels),
            "甜: 80%, 酸: 35%, 苦: 0%, 辣: 5%, 咸: 100%"
        );
    }

    #[test]
    fn test_schema_requires_all_recipe_fields() {
        let schema = recipe_response_schema();
        let required = schema["required"].as_array().unwrap();

        assert_eq!(required.len(), 7);
        assert_eq!(schema["properties"]["flavorProfile"]["required"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_image_prompt_mentions_recipe() {
        assert!(build_image_prompt("Yuzu Cloud Cream").contains("Yuzu Cloud Cream"));
    }
}
