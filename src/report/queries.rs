//! SQL for every report.
//!
//! Rankings group by the dimension id and break ties on it, so two entities
//! that print the same name stay separate and equal metrics order stably.
//! Price aggregations drop unknown prices (NULL or `''`) in the WHERE clause.

pub const PRICE_RATING: &str = "
SELECT review.rating AS rating
     , CAST(wine.price AS REAL) AS price
FROM review
 JOIN wine ON review.wine_id = wine.wine_id
WHERE wine.price IS NOT NULL AND wine.price != ''";

pub const AVG_PRICE_PER_WINERY: &str = "
SELECT avg(CAST(wine.price AS REAL)) AS avg_price
     , winery.winery AS winery
FROM wine
 JOIN winery ON winery.winery_id = wine.winery_id
WHERE wine.price IS NOT NULL AND wine.price != ''
GROUP BY wine.winery_id
ORDER BY avg(CAST(wine.price AS REAL)) DESC, wine.winery_id ASC";

pub const AVG_RATING_PER_WINE: &str = "
SELECT avg(review.rating) AS avg_rating
     , designation.name || ' ' || winery.winery || ' ' || grape.name AS wine
FROM review
 JOIN wine ON wine.wine_id = review.wine_id
 JOIN designation ON designation.designation_id = wine.designation_id
 JOIN winery ON winery.winery_id = wine.winery_id
 JOIN grape ON grape.grape_id = wine.grape_id
GROUP BY review.wine_id
ORDER BY avg(review.rating) DESC, review.wine_id ASC";

pub const BEST_WINE_LOCATION: &str = "
SELECT designation.name || ' ' || winery.winery || ' ' || grape.name AS wine
     , r1.region AS region1
     , r2.region AS region2
     , province.province AS province
     , country.name AS country
     , winery.winery AS winery
FROM review
 JOIN wine ON wine.wine_id = review.wine_id
 JOIN designation ON designation.designation_id = wine.designation_id
 JOIN winery ON winery.winery_id = wine.winery_id
 JOIN grape ON grape.grape_id = wine.grape_id
 JOIN region AS r1 ON wine.region_1_id = r1.region_id
 JOIN region AS r2 ON wine.region_2_id = r2.region_id
 JOIN province ON wine.province_id = province.province_id
 JOIN country ON province.country_id = country.country_id
GROUP BY review.wine_id
ORDER BY avg(review.rating) DESC, review.wine_id ASC
LIMIT 1";

pub const AVG_PRICE_PER_PROVINCE: &str = "
SELECT avg(CAST(wine.price AS REAL)) AS price
     , province.province AS province
FROM wine
 JOIN province ON wine.province_id = province.province_id
WHERE wine.price IS NOT NULL AND wine.price != ''
GROUP BY province.province_id
ORDER BY avg(CAST(wine.price AS REAL)) DESC, province.province_id ASC";

pub const AVG_PRICE_PER_COUNTRY: &str = "
SELECT avg(CAST(wine.price AS REAL)) AS price
     , country.name AS country
FROM wine
 JOIN province ON wine.province_id = province.province_id
 JOIN country ON province.country_id = country.country_id
WHERE wine.price IS NOT NULL AND wine.price != ''
GROUP BY country.country_id
ORDER BY avg(CAST(wine.price AS REAL)) DESC, country.country_id ASC";

pub const WINES_PER_COUNTRY: &str = "
SELECT count(*) AS number
     , country.name AS country
FROM wine
 JOIN province ON province.province_id = wine.province_id
 JOIN country ON country.country_id = province.country_id
GROUP BY country.country_id
ORDER BY count(*) DESC, country.country_id ASC";

pub const WINES_PER_GRAPE: &str = "
SELECT count(*) AS number
     , grape.name AS grape
FROM wine
 JOIN grape ON grape.grape_id = wine.grape_id
GROUP BY grape.grape_id
ORDER BY count(*) DESC, grape.grape_id ASC";
